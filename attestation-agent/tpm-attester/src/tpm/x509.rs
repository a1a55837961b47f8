// Copyright (c) 2024 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

//! Minimal X.509 reader for TPM vendor certificates.
//!
//! Several vendors ship EK and issuing certificates that strict DER
//! parsers reject (non-minimal serial numbers, unsorted RDN sets). Only the
//! outer structure is walked here and the signed bytes are never
//! re-encoded from parsed content.

use der::asn1::{AnyRef, BitStringRef, ObjectIdentifier};
use der::{Decode, Encode, Tag, Tagged};
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::RsaPublicKey;

use crate::{AttestationError, Result};

pub const RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
pub const RSAES_OAEP: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.7");
pub const SHA1_WITH_RSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.5");
pub const SHA256_WITH_RSA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.11");
pub const SHA384_WITH_RSA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.12");
pub const SHA512_WITH_RSA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.13");

// DER content octets of the two key OIDs above
const RSAES_OAEP_OID_BYTES: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x07];
const RSA_ENCRYPTION_OID_BYTES: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01];

/// EK certificates tag their key as `id-RSAES-OAEP`. Rewrite every
/// occurrence to `rsaEncryption` so the key reads as a plain RSA key.
///
/// The result no longer matches the issuer signature.
pub fn normalize_ek_oid(der: &[u8]) -> Vec<u8> {
    let mut out = der.to_vec();
    let n = RSAES_OAEP_OID_BYTES.len();
    let mut i = 0;
    while i + n <= out.len() {
        if &out[i..i + n] == RSAES_OAEP_OID_BYTES {
            out[i..i + n].copy_from_slice(RSA_ENCRYPTION_OID_BYTES);
            i += n;
        } else {
            i += 1;
        }
    }
    out
}

/// The parts of a certificate needed to check its signature and use its key.
#[derive(Debug)]
pub struct Certificate<'a> {
    tbs: Vec<u8>,
    signature_algorithm: ObjectIdentifier,
    signature: &'a [u8],
    key_algorithm: ObjectIdentifier,
    subject_public_key: &'a [u8],
}

impl<'a> Certificate<'a> {
    pub fn from_der(der: &'a [u8]) -> Result<Self> {
        let outer = Vec::<AnyRef<'a>>::from_der(der)?;
        let [tbs, signature_algorithm, signature] = outer.as_slice() else {
            return Err(malformed("certificate is not a 3 element sequence"));
        };

        let fields: Vec<AnyRef<'a>> = tbs.decode_as()?;
        // version is an optional explicit [0]
        let skip = match fields.first() {
            Some(first) if first.tag().is_context_specific() => 1,
            _ => 0,
        };
        let spki = fields
            .get(skip + 5)
            .ok_or_else(|| malformed("TBSCertificate has no subjectPublicKeyInfo"))?;

        let spki: Vec<AnyRef<'a>> = spki.decode_as()?;
        let [key_algorithm, subject_public_key] = spki.as_slice() else {
            return Err(malformed("subjectPublicKeyInfo is not a 2 element sequence"));
        };
        let subject_public_key = subject_public_key
            .decode_as::<BitStringRef<'a>>()?
            .as_bytes()
            .ok_or_else(|| malformed("subjectPublicKey has unused bits"))?;

        let signature = signature.decode_as::<BitStringRef<'a>>()?.raw_bytes();

        Ok(Self {
            tbs: tbs.to_der()?,
            signature_algorithm: algorithm_oid(signature_algorithm)?,
            signature,
            key_algorithm: algorithm_oid(key_algorithm)?,
            subject_public_key,
        })
    }

    /// Exact encoding of the signed `TBSCertificate`.
    pub fn tbs_bytes(&self) -> &[u8] {
        &self.tbs
    }

    pub fn signature_algorithm(&self) -> ObjectIdentifier {
        self.signature_algorithm
    }

    pub fn signature(&self) -> &[u8] {
        self.signature
    }

    pub fn key_algorithm(&self) -> ObjectIdentifier {
        self.key_algorithm
    }

    /// The subject key, which must be tagged `rsaEncryption`.
    pub fn rsa_public_key(&self) -> Result<RsaPublicKey> {
        if self.key_algorithm != RSA_ENCRYPTION {
            return Err(AttestationError::UnsupportedKeyType(format!(
                "certificate key algorithm {}",
                self.key_algorithm
            )));
        }

        RsaPublicKey::from_pkcs1_der(self.subject_public_key)
            .map_err(|e| AttestationError::UnsupportedKeyType(e.to_string()))
    }
}

/// Decode a PEM certificate into DER bytes.
pub fn pem_to_der(pem: &str) -> Result<Vec<u8>> {
    let (label, der) = der::pem::decode_vec(pem.as_bytes())
        .map_err(|e| malformed(&format!("PEM: {e}")))?;
    if label != "CERTIFICATE" {
        return Err(malformed(&format!("unexpected PEM label {label}")));
    }
    Ok(der)
}

fn algorithm_oid(algorithm: &AnyRef<'_>) -> Result<ObjectIdentifier> {
    let parts: Vec<AnyRef<'_>> = algorithm.decode_as()?;
    let oid = parts
        .first()
        .filter(|oid| oid.tag() == Tag::ObjectIdentifier)
        .ok_or_else(|| malformed("AlgorithmIdentifier without an OID"))?;
    Ok(oid.decode_as()?)
}

fn malformed(msg: &str) -> AttestationError {
    AttestationError::MalformedCertificate(msg.to_string())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::tpm::test_utils;

    #[rstest]
    #[case(include_str!("anchors/stm1.pem"), SHA256_WITH_RSA)]
    #[case(include_str!("anchors/ntc1.pem"), SHA1_WITH_RSA)]
    #[case(include_str!("anchors/ifx15.pem"), SHA1_WITH_RSA)]
    fn test_vendor_certificates(#[case] pem: &str, #[case] algorithm: ObjectIdentifier) {
        let der = pem_to_der(pem).unwrap();
        let cert = Certificate::from_der(&der).unwrap();
        assert_eq!(cert.signature_algorithm(), algorithm);
        assert_eq!(cert.key_algorithm(), RSA_ENCRYPTION);
        assert_eq!(cert.signature().len(), 256);
        assert!(der.windows(cert.tbs_bytes().len()).any(|w| w == cert.tbs_bytes()));
        assert!(cert.rsa_public_key().is_ok());
    }

    #[test]
    fn test_generated_certificate() {
        let (key, _) = test_utils::rsa_keypair();
        let cert = test_utils::self_signed_cert(&key, "unit");
        let parsed = Certificate::from_der(&cert).unwrap();
        assert_eq!(parsed.signature_algorithm(), SHA256_WITH_RSA);
        assert_eq!(parsed.rsa_public_key().unwrap(), test_utils::rsa_public(&key));
    }

    #[test]
    fn test_normalize_oid() {
        let mut der = vec![0x06, 0x09];
        der.extend_from_slice(RSAES_OAEP_OID_BYTES);
        der.extend_from_slice(&[0x05, 0x00, 0x06, 0x09]);
        der.extend_from_slice(RSAES_OAEP_OID_BYTES);

        let normalized = normalize_ek_oid(&der);
        assert_eq!(normalized.len(), der.len());
        assert_eq!(&normalized[2..11], RSA_ENCRYPTION_OID_BYTES);
        assert_eq!(&normalized[15..], RSA_ENCRYPTION_OID_BYTES);
        assert_eq!(normalize_ek_oid(&normalized), normalized);
    }

    #[test]
    fn test_oaep_tagged_key_rejected_until_normalized() {
        let (key, _) = test_utils::rsa_keypair();
        let cert = test_utils::oaep_tagged_cert(&key, &key, "ek");
        let parsed = Certificate::from_der(&cert).unwrap();
        assert_eq!(parsed.key_algorithm(), RSAES_OAEP);
        assert!(matches!(
            parsed.rsa_public_key(),
            Err(AttestationError::UnsupportedKeyType(_))
        ));

        let normalized = normalize_ek_oid(&cert);
        let parsed = Certificate::from_der(&normalized).unwrap();
        assert_eq!(parsed.rsa_public_key().unwrap(), test_utils::rsa_public(&key));
    }

    #[rstest]
    #[case(&[])]
    #[case(&[0x30, 0x00])]
    #[case(&[0x30, 0x03, 0x02, 0x01, 0x05])]
    #[case(&[0x04, 0x02, 0x30, 0x00])]
    fn test_malformed(#[case] der: &[u8]) {
        assert!(matches!(
            Certificate::from_der(der),
            Err(AttestationError::MalformedCertificate(_))
        ));
    }

    #[test]
    fn test_pem_label() {
        let pem = "-----BEGIN PUBLIC KEY-----\nMAA=\n-----END PUBLIC KEY-----\n";
        assert!(pem_to_der(pem).is_err());
    }
}
