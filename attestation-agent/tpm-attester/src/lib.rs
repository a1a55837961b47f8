// Copyright (c) 2024 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

//! Client side of TPM 1.2 remote attestation.
//!
//! The crate proves that an attestation identity key lives in a certified
//! TPM (`TPM_ActivateIdentity` challenge) and verifies PCR quotes signed
//! with that key. Talking to the TPM itself is left to a [`tpm::TpmTransport`]
//! implementation.

#[macro_use]
extern crate strum;

pub mod config;
mod error;
pub use error::*;
pub mod tpm;
mod types;
pub use types::*;

pub use tpm::{generate_challenge, quote_verify, verify_ek, TpmClient, TrustStore};
