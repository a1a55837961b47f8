// Copyright (c) 2024 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

//! Keys and certificates minted with OpenSSL for unit tests.

use std::collections::BTreeMap;

use crypto::sha1_digest;
use der::asn1::{AnyRef, BitStringRef};
use der::{Decode, Encode, Header, Tag};
use openssl::asn1::Asn1Time;
use openssl::bn::BigNum;
use openssl::hash::MessageDigest;
use openssl::pkey::{PKey, Private};
use openssl::rsa::Rsa;
use openssl::x509::{X509Builder, X509NameBuilder};
use rsa::pkcs8::DecodePrivateKey;
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

use super::quote::PcrValue;

const RSA_ENCRYPTION_OID: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01];
const RSAES_OAEP_OID: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x07];

pub const EK_GOLDEN_PEM: &str = include_str!("../../tests/data/ek-golden.pem");
pub const AIK_GOLDEN_PEM: &str = include_str!("../../tests/data/aik-golden.pem");

/// Quote by the golden AIK over PCRs 0, 1 and 10 holding [`golden_pcrs`].
pub const LOW_QUOTE_INFO: &str = "0101000051554f5442ccdad8ec765cdb5fccbfa9c0e77eafa7d1c0c4\
                                  505152535455565758595a5b5c5d5e5f60616263";
pub const LOW_SIGNATURE: &str = "\
    0b8e8372291334ef5cd59a8a7f7265f5c5d32a0fbdbf4016304aba66c8df4181\
    c86e3348db4e5374351384d28fe77ac82c02a0efff3c14fa9f1953f93ea92aef\
    ed5701bb6aebe2b818ce6ccc1c7de7feb0946071e3afb18a955d0ce009571d84\
    f2ed1bb829f09c22b9d1d604d0db30f123dca29583b318412fd98111c19a225d\
    adb32126fb426734c6261a70fdffc876d7d635127c1b1a4561d9712fc95bf36c\
    48463eeb91a48531481352f34342e7eda2e79cf66ab1f6985e881cb226a3eb21\
    abb5b8bef13ee349ba77c03b472af53b81031ced10650e951775d7328dc516ec\
    4192f8d2fef10a5ed97e400a83ec0fa48dc9fbd6e343a4b8fc91cf5a70ec95fd";

/// PCR snapshot `index -> SHA1("pcr<index>")` the golden quotes cover.
pub fn golden_pcrs(indices: &[u32]) -> BTreeMap<u32, PcrValue> {
    indices
        .iter()
        .map(|i| (*i, sha1_digest(format!("pcr{i}").as_bytes())))
        .collect()
}

/// Modulus of the golden AIK.
pub fn aik_modulus() -> Vec<u8> {
    let (key, _) = golden_key(AIK_GOLDEN_PEM);
    modulus(&key)
}

/// A fresh 2048-bit key in both OpenSSL and RustCrypto form.
pub fn rsa_keypair() -> (PKey<Private>, RsaPrivateKey) {
    let key = PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap();
    let private = RsaPrivateKey::from_pkcs8_der(&key.private_key_to_pkcs8().unwrap()).unwrap();
    (key, private)
}

pub fn golden_key(pem: &str) -> (PKey<Private>, RsaPrivateKey) {
    let private = RsaPrivateKey::from_pkcs8_pem(pem).unwrap();
    let key = PKey::private_key_from_pem(pem.as_bytes()).unwrap();
    (key, private)
}

pub fn rsa_public(key: &PKey<Private>) -> RsaPublicKey {
    let inner = key.rsa().unwrap();
    RsaPublicKey::new(
        rsa::BigUint::from_bytes_be(&inner.n().to_vec()),
        rsa::BigUint::from_bytes_be(&inner.e().to_vec()),
    )
    .unwrap()
}

pub fn modulus(key: &PKey<Private>) -> Vec<u8> {
    key.rsa().unwrap().n().to_vec()
}

pub fn self_signed_cert(key: &PKey<Private>, cn: &str) -> Vec<u8> {
    issued_cert(key, cn, key, cn, MessageDigest::sha256())
}

/// Certificate for `subject` signed by `issuer`.
pub fn issued_cert(
    subject: &PKey<Private>,
    subject_cn: &str,
    issuer: &PKey<Private>,
    issuer_cn: &str,
    digest: MessageDigest,
) -> Vec<u8> {
    let name = |cn: &str| {
        let mut builder = X509NameBuilder::new().unwrap();
        builder.append_entry_by_text("O", "TPM Test Vendor").unwrap();
        builder.append_entry_by_text("CN", cn).unwrap();
        builder.build()
    };

    let mut builder = X509Builder::new().unwrap();
    builder.set_version(2).unwrap();
    let serial = BigNum::from_u32(0x1001).unwrap().to_asn1_integer().unwrap();
    builder.set_serial_number(&serial).unwrap();
    builder.set_subject_name(&name(subject_cn)).unwrap();
    builder.set_issuer_name(&name(issuer_cn)).unwrap();
    builder
        .set_not_before(&Asn1Time::days_from_now(0).unwrap())
        .unwrap();
    builder
        .set_not_after(&Asn1Time::days_from_now(3650).unwrap())
        .unwrap();
    builder.set_pubkey(subject).unwrap();
    builder.sign(issuer, digest).unwrap();
    builder.build().to_der().unwrap()
}

/// EK style certificate: the subject key is tagged `id-RSAES-OAEP` and the
/// certificate is signed by `issuer` over that encoding.
pub fn oaep_tagged_cert(subject: &PKey<Private>, issuer: &PKey<Private>, cn: &str) -> Vec<u8> {
    let cert = issued_cert(subject, cn, issuer, "EK Issuing CA", MessageDigest::sha256());
    let outer = Vec::<AnyRef>::from_der(&cert).unwrap();

    let mut tbs = outer[0].to_der().unwrap();
    let at = tbs
        .windows(RSA_ENCRYPTION_OID.len())
        .position(|w| w == RSA_ENCRYPTION_OID)
        .unwrap();
    tbs[at..at + RSAES_OAEP_OID.len()].copy_from_slice(RSAES_OAEP_OID);

    let issuer = RsaPrivateKey::from_pkcs8_der(&issuer.private_key_to_pkcs8().unwrap()).unwrap();
    let signature = issuer
        .sign(Pkcs1v15Sign::new::<Sha256>(), &Sha256::digest(&tbs))
        .unwrap();

    let mut body = tbs;
    body.extend(outer[1].to_der().unwrap());
    body.extend(
        BitStringRef::from_bytes(&signature)
            .unwrap()
            .to_der()
            .unwrap(),
    );

    let mut out = Header::new(Tag::Sequence, body.len())
        .unwrap()
        .to_der()
        .unwrap();
    out.extend(body);
    out
}
