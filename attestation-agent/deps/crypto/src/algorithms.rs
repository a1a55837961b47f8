// Copyright (c) 2024 Alibaba Cloud
// Copyright (c) 2024 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0
//

use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};

/// Hash algorithms used by mask generation and TPM structure digests
#[derive(
    EnumString, AsRefStr, Serialize, Deserialize, Clone, Debug, Display, Copy, PartialEq, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// TPM 1.2 only knows SHA-1
    #[default]
    #[strum(serialize = "sha1")]
    Sha1,

    #[strum(serialize = "sha256")]
    Sha256,

    #[strum(serialize = "sha384")]
    Sha384,

    #[strum(serialize = "sha512")]
    Sha512,
}

fn hash_material<D: Digest>(material: &[u8]) -> Vec<u8> {
    D::new().chain_update(material).finalize().to_vec()
}

/// SHA-1 digest as a fixed array, the unit of every TPM 1.2 hash field.
pub fn sha1_digest(material: &[u8]) -> [u8; 20] {
    Sha1::digest(material).into()
}

impl HashAlgorithm {
    /// Return the hash value length in bytes
    pub fn digest_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    pub fn digest(&self, material: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha1 => hash_material::<Sha1>(material),
            HashAlgorithm::Sha256 => hash_material::<Sha256>(material),
            HashAlgorithm::Sha384 => hash_material::<Sha384>(material),
            HashAlgorithm::Sha512 => hash_material::<Sha512>(material),
        }
    }

    /// Return a list of all supported hash algorithms.
    pub fn list_all() -> Vec<Self> {
        vec![
            HashAlgorithm::Sha1,
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha384,
            HashAlgorithm::Sha512,
        ]
    }
}
