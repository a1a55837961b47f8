// Copyright (c) 2024 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

use async_trait::async_trait;
use crypto::asymmetric::rsa::TPM_DEFAULT_EXPONENT;
use thiserror::Error;

use crate::{ChallengeEnvelope, RsaKeyMaterial, Secret};

/// Failures reported by a TPM services stack.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// `TPM_E_AUTH_CONFLICT`, the object needs an authorization value
    #[error("authorization conflict")]
    AuthConflict,

    /// `TSS_E_POLICY_NO_SECRET`
    #[error("policy has no secret")]
    PolicyNoSecret,

    /// `TPM_E_DECRYPT_ERROR` from `TPM_ActivateIdentity`
    #[error("TPM could not decrypt the challenge")]
    DecryptError,

    /// `TPM_E_OWNER_SET`
    #[error("TPM already has an owner")]
    AlreadyOwned,

    /// `TPM_E_DISABLED_CMD`
    #[error("TPM command is disabled")]
    Disabled,

    #[error("TPM transport failure: {0}")]
    Other(String),
}

impl TransportError {
    /// Whether retrying with an authorization value may succeed.
    pub fn needs_auth(&self) -> bool {
        matches!(
            self,
            TransportError::AuthConflict | TransportError::PolicyNoSecret
        )
    }
}

/// AIK created by `TPM_CollateIdentityRequest`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentityKey {
    // TPM_PUBKEY of the AIK, the blob hashed into a challenge
    pub public: Vec<u8>,
    // TSS key blob, wrapped by the SRK
    pub blob: Vec<u8>,
    // AIK modulus, for quote verification
    pub modulus: Vec<u8>,
}

impl IdentityKey {
    /// The AIK as quote verification key. `TPM_CollateIdentityRequest`
    /// always uses the default exponent.
    pub fn rsa_key(&self) -> RsaKeyMaterial {
        RsaKeyMaterial::new(self.modulus.clone(), TPM_DEFAULT_EXPONENT.to_be_bytes())
    }
}

/// The TPM commands identity activation relies on. Production code
/// implements this over a TSS stack; each call is one stateful TPM
/// operation.
#[async_trait]
pub trait TpmTransport: Send + Sync {
    /// Read the EK certificate NV index, optionally authorizing with `auth`.
    /// Returns the raw NV contents.
    async fn read_ek_certificate(&self, auth: Option<&Secret>) -> Result<Vec<u8>, TransportError>;

    /// `TPM_ReadPubek`, returning the EK modulus.
    async fn read_ek_public(&self, auth: Option<&Secret>) -> Result<Vec<u8>, TransportError>;

    /// Create a 2048-bit AIK under the SRK.
    async fn collate_identity_request(
        &self,
        srk_auth: &Secret,
        owner_auth: &Secret,
    ) -> Result<IdentityKey, TransportError>;

    /// Load `aik` and run `TPM_ActivateIdentity` on `envelope`, returning
    /// the decrypted secret.
    async fn activate_identity(
        &self,
        srk_auth: &Secret,
        owner_auth: &Secret,
        aik: &IdentityKey,
        envelope: &ChallengeEnvelope,
    ) -> Result<Vec<u8>, TransportError>;

    async fn take_ownership(
        &self,
        owner_auth: &Secret,
        srk_auth: &Secret,
    ) -> Result<(), TransportError>;
}
