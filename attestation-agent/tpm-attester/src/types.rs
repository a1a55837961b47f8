// Copyright (c) 2025 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

use std::fmt;

use crypto::asymmetric::rsa::{public_key, TPM_DEFAULT_EXPONENT};
use rand::{CryptoRng, RngCore};
use rsa::RsaPublicKey;
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{AttestationError, Result};

/// Length of a TPM 1.2 authorization value.
pub const SECRET_LEN: usize = 20;

/// Authorization value or challenge secret. Wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Secret(Vec<u8>);

impl Secret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// `TPM_WELL_KNOWN_SECRET`, the auth value of an SRK or owner created
    /// without a password.
    pub fn well_known() -> Self {
        Self(vec![0; SECRET_LEN])
    }

    /// Fresh 20-byte secret for a single challenge.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = vec![0; SECRET_LEN];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret([REDACTED; {}])", self.0.len())
    }
}

/// RSA public key as carried in TPM structures, both halves big-endian.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaKeyMaterial {
    // Hex encoded modulus
    #[serde(with = "hex")]
    pub modulus: Vec<u8>,
    // Hex encoded public exponent
    #[serde(with = "hex")]
    pub exponent: Vec<u8>,
}

impl RsaKeyMaterial {
    pub fn new(modulus: impl Into<Vec<u8>>, exponent: impl Into<Vec<u8>>) -> Self {
        Self {
            modulus: modulus.into(),
            exponent: exponent.into(),
        }
    }

    pub fn to_public_key(&self) -> Result<RsaPublicKey> {
        public_key(&self.modulus, &self.exponent)
            .map_err(|e| AttestationError::UnsupportedKeyType(e.to_string()))
    }
}

/// The TPM endorsement key as handed over by the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EndorsementKeyMaterial {
    /// DER encoded EK certificate
    Certificate(Vec<u8>),
    /// Bare EK modulus, the exponent is always 0x10001
    PublicKey { modulus: Vec<u8> },
}

impl EndorsementKeyMaterial {
    pub(crate) fn bare_key(modulus: &[u8]) -> Result<RsaPublicKey> {
        RsaKeyMaterial::new(modulus, TPM_DEFAULT_EXPONENT.to_be_bytes()).to_public_key()
    }
}

/// `TPM_ActivateIdentity` input: the EK encrypted `TPM_ASYM_CA_CONTENTS`
/// and the `TPM_SYM_CA_ATTESTATION` carrying the encrypted secret.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeEnvelope {
    // Base64 encoded
    #[serde_as(as = "Base64")]
    pub asym: Vec<u8>,
    // Base64 encoded
    #[serde_as(as = "Base64")]
    pub sym: Vec<u8>,
}
