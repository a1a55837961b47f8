// Copyright (c) 2024 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

//! TPM 1.2 identity activation and quote verification.

use log::{debug, info, warn};
use rand::rngs::OsRng;

mod anchors;
pub mod challenge;
pub mod ek;
pub mod quote;
pub mod transport;
pub mod trust_store;
pub mod x509;

#[cfg(test)]
mod simulator;
#[cfg(test)]
mod test_utils;

pub use anchors::{Manufacturer, BUILTIN_ANCHORS_VERSION};
pub use challenge::{generate_challenge, generate_challenge_with_rng};
pub use ek::{parse_ek_nv_blob, EK_CERT_NV_INDEX};
pub use quote::{quote_verify, PcrComposite, PcrValue, PCR_COUNT};
pub use transport::{IdentityKey, TpmTransport, TransportError};
pub use trust_store::{verify_ek, TrustAnchor, TrustStore, TrustStoreBuilder};

use crate::{ChallengeEnvelope, EndorsementKeyMaterial, Result, Secret};

/// Drives identity activation against a TPM reached through `T`.
#[derive(Debug, Default)]
pub struct TpmClient<T> {
    transport: T,
}

impl<T: TpmTransport> TpmClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Read and unwrap the EK certificate from NV. A TPM that wants
    /// authorization for the read gets the well-known secret.
    pub async fn ek_certificate(&self) -> Result<Vec<u8>> {
        let blob = match self.transport.read_ek_certificate(None).await {
            Ok(blob) => blob,
            Err(e) if e.needs_auth() => {
                debug!("EK certificate read needs authorization ({e}), retrying");
                let auth = Secret::well_known();
                self.transport.read_ek_certificate(Some(&auth)).await?
            }
            Err(e) => return Err(e.into()),
        };
        parse_ek_nv_blob(&blob)
    }

    /// `TPM_ReadPubek`, with the same authorization retry as
    /// [`Self::ek_certificate`].
    pub async fn ek_public(&self) -> Result<EndorsementKeyMaterial> {
        let modulus = match self.transport.read_ek_public(None).await {
            Ok(modulus) => modulus,
            Err(e) if e.needs_auth() => {
                debug!("EK public key read needs authorization ({e}), retrying");
                let auth = Secret::well_known();
                self.transport.read_ek_public(Some(&auth)).await?
            }
            Err(e) => return Err(e.into()),
        };
        Ok(EndorsementKeyMaterial::PublicKey { modulus })
    }

    pub async fn create_identity_key(&self) -> Result<IdentityKey> {
        let aik = self
            .transport
            .collate_identity_request(&Secret::well_known(), &Secret::well_known())
            .await?;
        info!("Created identity key, {} byte public blob", aik.public.len());
        Ok(aik)
    }

    /// Hand `envelope` to the TPM. `Ok(None)` means the TPM could not
    /// decrypt it, so the challenge was not meant for this EK and AIK.
    pub async fn challenge_response(
        &self,
        aik: &IdentityKey,
        envelope: &ChallengeEnvelope,
    ) -> Result<Option<Vec<u8>>> {
        let well_known = Secret::well_known();
        match self
            .transport
            .activate_identity(&well_known, &well_known, aik, envelope)
            .await
        {
            Ok(secret) => Ok(Some(secret)),
            Err(TransportError::DecryptError) => {
                warn!("TPM rejected the identity challenge");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Take ownership with well-known owner and SRK secrets. `Ok(false)`
    /// when the TPM is disabled or already owned.
    pub async fn take_ownership(&self) -> Result<bool> {
        let well_known = Secret::well_known();
        match self
            .transport
            .take_ownership(&well_known, &well_known)
            .await
        {
            Ok(()) => {
                info!("Took ownership of the TPM");
                Ok(true)
            }
            Err(e @ (TransportError::Disabled | TransportError::AlreadyOwned)) => {
                warn!("Cannot take TPM ownership: {e}");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Prove that `aik` lives in this TPM: check the EK certificate against
    /// `store`, then have the TPM decrypt a fresh challenge bound to `aik`.
    pub async fn activate(&self, store: &TrustStore, aik: &IdentityKey) -> Result<bool> {
        let ek_cert = self.ek_certificate().await?;
        if !store.verify_ek(&ek_cert)? {
            warn!("EK certificate is not signed by a trusted manufacturer");
            return Ok(false);
        }

        let secret = Secret::random(&mut OsRng);
        let envelope = generate_challenge(
            &EndorsementKeyMaterial::Certificate(ek_cert),
            &aik.public,
            secret.as_bytes(),
        )?;

        let Some(response) = self.challenge_response(aik, &envelope).await? else {
            return Ok(false);
        };
        let response = Secret::new(response);
        if response != secret {
            warn!("TPM answered the identity challenge with the wrong secret");
            return Ok(false);
        }

        info!("Identity key activated");
        Ok(true)
    }
}
