// Copyright (c) 2024 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use rsa::{Pkcs1v15Sign, RsaPublicKey};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};

use super::anchors::{
    AnchorSource, Manufacturer, BUILTIN_ANCHORS, BUILTIN_ANCHORS_VERSION, BUILTIN_MODULUS_EXPONENT,
};
use super::x509::{
    pem_to_der, Certificate, SHA1_WITH_RSA, SHA256_WITH_RSA, SHA384_WITH_RSA, SHA512_WITH_RSA,
};
use crate::config::TrustStoreConfig;
use crate::{AttestationError, Result, RsaKeyMaterial};

/// A key that may have signed an EK certificate.
#[derive(Clone, Debug)]
pub struct TrustAnchor {
    name: String,
    manufacturer: Manufacturer,
    // DER of the issuing certificate, None for bare key anchors
    certificate: Option<Vec<u8>>,
    key: RsaPublicKey,
}

impl TrustAnchor {
    pub fn from_certificate(
        name: impl Into<String>,
        manufacturer: Manufacturer,
        der: Vec<u8>,
    ) -> Result<Self> {
        let key = Certificate::from_der(&der)?.rsa_public_key()?;
        Ok(Self {
            name: name.into(),
            manufacturer,
            certificate: Some(der),
            key,
        })
    }

    pub fn from_key(
        name: impl Into<String>,
        manufacturer: Manufacturer,
        key: &RsaKeyMaterial,
    ) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            manufacturer,
            certificate: None,
            key: key.to_public_key()?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn manufacturer(&self) -> Manufacturer {
        self.manufacturer
    }

    pub fn certificate(&self) -> Option<&[u8]> {
        self.certificate.as_deref()
    }

    /// Whether this anchor's key produced the signature on `cert`.
    fn verifies(&self, cert: &Certificate<'_>) -> bool {
        let algorithm = cert.signature_algorithm();
        let tbs = cert.tbs_bytes();
        let signature = cert.signature();
        let outcome = if algorithm == SHA1_WITH_RSA {
            self.key
                .verify(Pkcs1v15Sign::new::<Sha1>(), &Sha1::digest(tbs), signature)
        } else if algorithm == SHA256_WITH_RSA {
            self.key
                .verify(Pkcs1v15Sign::new::<Sha256>(), &Sha256::digest(tbs), signature)
        } else if algorithm == SHA384_WITH_RSA {
            self.key
                .verify(Pkcs1v15Sign::new::<Sha384>(), &Sha384::digest(tbs), signature)
        } else if algorithm == SHA512_WITH_RSA {
            self.key
                .verify(Pkcs1v15Sign::new::<Sha512>(), &Sha512::digest(tbs), signature)
        } else {
            debug!("Unsupported EK certificate signature algorithm {algorithm}");
            return false;
        };
        outcome.is_ok()
    }
}

/// Immutable set of EK issuing keys. Build it once and share it (for
/// example behind an `Arc`); lookups never mutate it.
#[derive(Clone, Debug, Default)]
pub struct TrustStore {
    anchors: Vec<TrustAnchor>,
}

impl TrustStore {
    pub fn builder() -> TrustStoreBuilder {
        TrustStoreBuilder::default()
    }

    /// The built-in vendor table.
    pub fn builtin() -> Self {
        Self::builder().with_builtin_anchors().build()
    }

    pub fn from_config(config: &TrustStoreConfig) -> Result<Self> {
        let mut builder = Self::builder();
        if config.builtin_anchors {
            builder = builder.with_builtin_anchors();
        }

        for path in &config.certificates {
            builder = builder.with_certificate_file(path)?;
        }

        for key in &config.keys {
            let material = RsaKeyMaterial::new(
                hex::decode(&key.modulus).map_err(|e| {
                    AttestationError::UnsupportedKeyType(format!("anchor {}: {e}", key.name))
                })?,
                hex::decode(&key.exponent).map_err(|e| {
                    AttestationError::UnsupportedKeyType(format!("anchor {}: {e}", key.name))
                })?,
            );
            builder = builder.with_public_key(&key.name, &material)?;
        }

        let store = builder.build();
        info!("Loaded {} EK trust anchors", store.len());
        Ok(store)
    }

    pub fn anchors(&self) -> &[TrustAnchor] {
        &self.anchors
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Check whether any anchor signed `ek_cert_der`. Only a structurally
    /// broken certificate is an error; an unknown issuer is `Ok(false)`.
    pub fn verify_ek(&self, ek_cert_der: &[u8]) -> Result<bool> {
        let cert = Certificate::from_der(ek_cert_der)?;
        match self.anchors.iter().find(|anchor| anchor.verifies(&cert)) {
            Some(anchor) => {
                info!(
                    "EK certificate verified by {} ({})",
                    anchor.name, anchor.manufacturer
                );
                Ok(true)
            }
            None => {
                debug!(
                    "EK certificate not signed by any of {} anchors",
                    self.anchors.len()
                );
                Ok(false)
            }
        }
    }
}

/// Append-only builder for [`TrustStore`].
#[derive(Default)]
pub struct TrustStoreBuilder {
    anchors: Vec<TrustAnchor>,
}

impl TrustStoreBuilder {
    /// Add the versioned vendor table. Entries that fail to decode are
    /// logged and left out.
    pub fn with_builtin_anchors(mut self) -> Self {
        for builtin in BUILTIN_ANCHORS {
            let anchor = match builtin.source {
                AnchorSource::Pem(pem) => pem_to_der(pem).and_then(|der| {
                    TrustAnchor::from_certificate(builtin.name, builtin.manufacturer, der)
                }),
                AnchorSource::Modulus(modulus) => hex::decode(modulus)
                    .map_err(|e| AttestationError::UnsupportedKeyType(e.to_string()))
                    .and_then(|modulus| {
                        let key =
                            RsaKeyMaterial::new(modulus, BUILTIN_MODULUS_EXPONENT.to_be_bytes());
                        TrustAnchor::from_key(builtin.name, builtin.manufacturer, &key)
                    }),
            };

            match anchor {
                Ok(anchor) => self.anchors.push(anchor),
                Err(e) => warn!(
                    "Skipping built-in anchor {} (table v{BUILTIN_ANCHORS_VERSION}): {e}",
                    builtin.name
                ),
            }
        }
        self
    }

    pub fn with_anchor(mut self, anchor: TrustAnchor) -> Self {
        self.anchors.push(anchor);
        self
    }

    pub fn with_certificate_der(self, name: &str, der: Vec<u8>) -> Result<Self> {
        let anchor = TrustAnchor::from_certificate(name, Manufacturer::Custom, der)?;
        Ok(self.with_anchor(anchor))
    }

    pub fn with_certificate_pem(self, name: &str, pem: &str) -> Result<Self> {
        self.with_certificate_der(name, pem_to_der(pem)?)
    }

    /// Add a PEM or DER certificate read from disk.
    pub fn with_certificate_file(self, path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| {
            AttestationError::MalformedCertificate(format!("read {}: {e}", path.display()))
        })?;
        let name = path.display().to_string();
        match std::str::from_utf8(&bytes) {
            Ok(pem) if pem.contains("-----BEGIN") => self.with_certificate_pem(&name, pem),
            _ => self.with_certificate_der(&name, bytes),
        }
    }

    pub fn with_public_key(self, name: &str, key: &RsaKeyMaterial) -> Result<Self> {
        let anchor = TrustAnchor::from_key(name, Manufacturer::Custom, key)?;
        Ok(self.with_anchor(anchor))
    }

    pub fn build(self) -> TrustStore {
        TrustStore {
            anchors: self.anchors,
        }
    }
}

/// Verify `ek_cert_der` against `anchors`, see [`TrustStore::verify_ek`].
pub fn verify_ek(ek_cert_der: &[u8], anchors: &TrustStore) -> Result<bool> {
    anchors.verify_ek(ek_cert_der)
}
