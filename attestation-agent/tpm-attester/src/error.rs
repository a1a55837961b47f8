// Copyright (c) 2024 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

use thiserror::Error;

use crate::tpm::TransportError;

pub type Result<T> = std::result::Result<T, AttestationError>;

/// Attestation error types
#[derive(Error, Debug)]
pub enum AttestationError {
    #[error("crypto error: {0}")]
    Crypto(#[from] crypto::Error),

    #[error("malformed certificate: {0}")]
    MalformedCertificate(String),

    #[error("invalid EK certificate tag {0:#06x}")]
    InvalidTag(u16),

    #[error("invalid EK certificate header byte {0:#04x}")]
    InvalidHeader(u8),

    #[error("EK certificate type {0:#04x} is not a full certificate")]
    NotFullCertificate(u8),

    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(String),

    #[error("quote info is {0} bytes, too short to hold a composite digest")]
    MalformedQuote(usize),

    #[error("PCR index {0} is out of range")]
    InvalidPcrIndex(u32),

    #[error("TPM transport error: {0}")]
    Transport(#[from] TransportError),
}

impl From<der::Error> for AttestationError {
    fn from(e: der::Error) -> Self {
        AttestationError::MalformedCertificate(e.to_string())
    }
}
