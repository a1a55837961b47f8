// Copyright (c) 2022 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

//! Implementations backed by OpenSSL.

pub mod aes128cbc;
