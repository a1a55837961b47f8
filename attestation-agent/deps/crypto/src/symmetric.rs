// Copyright (c) 2022 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

//! AES-128-CBC with PKCS#7 padding, the symmetric scheme
//! `TPM_ES_SYM_CBC_PKCS5PAD` used by `TPM_ActivateIdentity`.

#[cfg(feature = "openssl")]
pub use crate::native::aes128cbc::*;

#[cfg(all(feature = "rust-crypto", not(feature = "openssl")))]
pub use crate::rust::aes128cbc::*;

pub const AES128_KEY_LEN: usize = 16;

pub const AES_BLOCK_LEN: usize = 16;
