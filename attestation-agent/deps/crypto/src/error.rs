// Copyright (c) 2024 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("integer too large to encode in {0} bytes")]
    IntegerTooLarge(usize),

    #[error("mask length {0} exceeds the MGF1 bound")]
    MaskTooLong(usize),

    #[error("plaintext of {len} bytes does not fit a {key_len}-byte OAEP block")]
    PlaintextTooLarge { len: usize, key_len: usize },

    #[error("RSA operation failed: {0}")]
    Rsa(String),

    #[error("symmetric cipher failed: {0}")]
    Cipher(String),
}

impl From<rsa::Error> for Error {
    fn from(e: rsa::Error) -> Self {
        Error::Rsa(e.to_string())
    }
}
