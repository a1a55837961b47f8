// Copyright (c) 2024 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

//! In-memory TPM 1.2 holding an EK private key, for exercising the
//! client flows without hardware.

use std::sync::Mutex;

use async_trait::async_trait;
use crypto::encoding::{i2osp, os2ip};
use crypto::mgf::mgf1;
use crypto::{sha1_digest, symmetric, HashAlgorithm};
use rsa::hazmat::rsa_decrypt_and_check;
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;

use super::transport::{IdentityKey, TpmTransport, TransportError};
use crate::{ChallengeEnvelope, Secret};

const SYM_HEADER_LEN: usize = 28;

pub struct SimulatedTpm {
    ek: RsaPrivateKey,
    aik: IdentityKey,
    ek_nv: Option<Vec<u8>>,
    // Authorization the EK reads demand, None for open access
    ek_auth: Option<Secret>,
    owned: Mutex<bool>,
    disabled: bool,
}

impl SimulatedTpm {
    /// `aik_pub` is the opaque `TPM_PUBKEY` blob, `aik_modulus` the key
    /// it describes.
    pub fn new(ek: RsaPrivateKey, aik_pub: Vec<u8>, aik_modulus: Vec<u8>) -> Self {
        Self {
            ek,
            aik: IdentityKey {
                public: aik_pub,
                blob: b"simulated aik blob".to_vec(),
                modulus: aik_modulus,
            },
            ek_nv: None,
            ek_auth: None,
            owned: Mutex::new(false),
            disabled: false,
        }
    }

    /// Store `cert_der` in the EK certificate NV index.
    pub fn with_ek_certificate(mut self, cert_der: &[u8]) -> Self {
        let mut nv = vec![0x10, 0x01, 0x00];
        nv.extend_from_slice(&(cert_der.len() as u16).to_be_bytes());
        nv.extend_from_slice(cert_der);
        self.ek_nv = Some(nv);
        self
    }

    pub fn with_ek_auth(mut self, auth: Secret) -> Self {
        self.ek_auth = Some(auth);
        self
    }

    pub fn with_owner(self) -> Self {
        *self.owned.lock().unwrap() = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    fn authorize(
        &self,
        auth: Option<&Secret>,
        missing: TransportError,
    ) -> Result<(), TransportError> {
        match (&self.ek_auth, auth) {
            (None, _) => Ok(()),
            (Some(expected), Some(given)) if expected == given => Ok(()),
            (Some(_), Some(_)) => Err(TransportError::Other("authorization failed".into())),
            (Some(_), None) => Err(missing),
        }
    }

    /// `TPM_ActivateIdentity` against the simulated EK.
    pub fn activate(&self, envelope: &ChallengeEnvelope) -> Result<Vec<u8>, TransportError> {
        let k = self.ek.size();
        let mut rng = rand::thread_rng();
        let m = rsa_decrypt_and_check(&self.ek, Some(&mut rng), &os2ip(&envelope.asym))
            .map_err(|_| TransportError::DecryptError)?;
        let block = i2osp(&m, k).map_err(|_| TransportError::DecryptError)?;
        let contents = oaep_decode(&block)?;

        if contents.len() != 44 || contents[..8] != [0u8, 0, 0, 6, 0, 0xff, 0, 0x10] {
            return Err(TransportError::DecryptError);
        }
        if contents[24..] != sha1_digest(&self.aik.public) {
            return Err(TransportError::DecryptError);
        }
        let key = &contents[8..24];

        let sym = &envelope.sym;
        if sym.len() < SYM_HEADER_LEN + 16 {
            return Err(TransportError::DecryptError);
        }
        let total = u32::from_be_bytes([sym[0], sym[1], sym[2], sym[3]]) as usize;
        if total != sym.len() - SYM_HEADER_LEN {
            return Err(TransportError::DecryptError);
        }
        let (iv, ciphertext) = sym[SYM_HEADER_LEN..].split_at(16);
        symmetric::decrypt(ciphertext, key, iv).map_err(|_| TransportError::DecryptError)
    }
}

fn oaep_decode(block: &[u8]) -> Result<Vec<u8>, TransportError> {
    let mut block = block.to_vec();
    let seed_mask =
        mgf1(&block[21..], 20, HashAlgorithm::Sha1).map_err(|_| TransportError::DecryptError)?;
    block[1..21]
        .iter_mut()
        .zip(seed_mask)
        .for_each(|(b, m)| *b ^= m);
    let db_mask = mgf1(&block[1..21], block.len() - 21, HashAlgorithm::Sha1)
        .map_err(|_| TransportError::DecryptError)?;
    block[21..]
        .iter_mut()
        .zip(db_mask)
        .for_each(|(b, m)| *b ^= m);

    if block[0] != 0 || block[21..41] != sha1_digest(b"TCPA") {
        return Err(TransportError::DecryptError);
    }
    let one = block[41..]
        .iter()
        .position(|b| *b != 0)
        .filter(|at| block[41 + at] == 0x01)
        .ok_or(TransportError::DecryptError)?;
    Ok(block[41 + one + 1..].to_vec())
}

#[async_trait]
impl TpmTransport for SimulatedTpm {
    async fn read_ek_certificate(&self, auth: Option<&Secret>) -> Result<Vec<u8>, TransportError> {
        self.authorize(auth, TransportError::AuthConflict)?;
        self.ek_nv
            .clone()
            .ok_or_else(|| TransportError::Other("EK certificate NV index not defined".into()))
    }

    async fn read_ek_public(&self, auth: Option<&Secret>) -> Result<Vec<u8>, TransportError> {
        self.authorize(auth, TransportError::PolicyNoSecret)?;
        Ok(self.ek.n().to_bytes_be())
    }

    async fn collate_identity_request(
        &self,
        srk_auth: &Secret,
        owner_auth: &Secret,
    ) -> Result<IdentityKey, TransportError> {
        if !*self.owned.lock().unwrap() {
            return Err(TransportError::Other("no SRK, TPM is not owned".into()));
        }
        if *srk_auth != Secret::well_known() || *owner_auth != Secret::well_known() {
            return Err(TransportError::AuthConflict);
        }
        Ok(self.aik.clone())
    }

    async fn activate_identity(
        &self,
        _srk_auth: &Secret,
        _owner_auth: &Secret,
        aik: &IdentityKey,
        envelope: &ChallengeEnvelope,
    ) -> Result<Vec<u8>, TransportError> {
        if aik.blob != self.aik.blob {
            return Err(TransportError::Other("unknown key blob".into()));
        }
        self.activate(envelope)
    }

    async fn take_ownership(
        &self,
        _owner_auth: &Secret,
        _srk_auth: &Secret,
    ) -> Result<(), TransportError> {
        if self.disabled {
            return Err(TransportError::Disabled);
        }
        let mut owned = self.owned.lock().unwrap();
        if *owned {
            return Err(TransportError::AlreadyOwned);
        }
        *owned = true;
        Ok(())
    }
}
