// Copyright (c) 2024 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

//! Cryptographic building blocks for TPM 1.2 identity activation:
//! octet encoding, MGF1, the TCG flavour of OAEP, raw RSA and the
//! AES-128-CBC cipher used for the symmetric half of a challenge.

#[macro_use]
extern crate strum;

mod algorithms;
pub use algorithms::*;

pub mod asymmetric;
pub mod encoding;
mod error;
pub use error::*;
pub mod mgf;
pub mod oaep;
pub mod symmetric;

#[cfg(feature = "openssl")]
mod native;

#[cfg(all(feature = "rust-crypto", not(feature = "openssl")))]
mod rust;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
