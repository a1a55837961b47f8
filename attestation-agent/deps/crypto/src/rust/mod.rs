// Copyright (c) 2022 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

//! Implementations backed by RustCrypto crates.

pub mod aes128cbc;
