// Copyright (c) 2024 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

//! `TPM_ActivateIdentity` challenge construction.
//!
//! The asymmetric half is a `TPM_ASYM_CA_CONTENTS` (session key plus the
//! digest of the AIK public key) padded with TCG OAEP and encrypted to the
//! EK. The symmetric half is a `TPM_SYM_CA_ATTESTATION` carrying the
//! secret encrypted under that session key.

use crypto::asymmetric::rsa::{key_len, raw_encrypt};
use crypto::oaep::tpm_oaep;
use crypto::sha1_digest;
use crypto::symmetric::{self, AES128_KEY_LEN, AES_BLOCK_LEN};
use log::debug;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use rsa::RsaPublicKey;
use zeroize::Zeroizing;

use super::x509::{normalize_ek_oid, Certificate};
use crate::{ChallengeEnvelope, EndorsementKeyMaterial, Result};

/// `TPM_ALG_AES128`
const TPM_ALG_AES128: u32 = 0x0000_0006;
/// `TPM_ES_SYM_CBC_PKCS5PAD`
const TPM_ES_SYM_CBC_PKCS5PAD: u16 = 0x00ff;
/// `TPM_SS_NONE`
const TPM_SS_NONE: u16 = 0x0001;
/// `TPM_SYMMETRIC_KEY_PARMS` size, key length in bits, block size in bytes.
const TPM_SYM_PARMS: [u32; 3] = [12, 128, 16];

/// Build a challenge for `aik_pub` with fresh randomness from the OS.
pub fn generate_challenge(
    ek: &EndorsementKeyMaterial,
    aik_pub: &[u8],
    secret: &[u8],
) -> Result<ChallengeEnvelope> {
    generate_challenge_with_rng(ek, aik_pub, secret, &mut OsRng)
}

/// Build a challenge drawing the AES key, the IV and the OAEP seed from
/// `rng`, in that order.
pub fn generate_challenge_with_rng<R: RngCore + CryptoRng>(
    ek: &EndorsementKeyMaterial,
    aik_pub: &[u8],
    secret: &[u8],
    rng: &mut R,
) -> Result<ChallengeEnvelope> {
    let mut aes_key = Zeroizing::new([0u8; AES128_KEY_LEN]);
    rng.fill_bytes(&mut aes_key[..]);
    let mut iv = [0u8; AES_BLOCK_LEN];
    rng.fill_bytes(&mut iv);

    let ek_key = endorsement_key(ek)?;

    let asym_contents = Zeroizing::new(asym_ca_contents(&aes_key[..], aik_pub));
    let padded = Zeroizing::new(tpm_oaep(&asym_contents, key_len(&ek_key), rng)?);
    let asym = raw_encrypt(&ek_key, &padded)?;

    let ciphertext = symmetric::encrypt(secret, &aes_key[..], &iv)?;
    let sym = sym_ca_attestation(&iv, &ciphertext);

    debug!(
        "Built identity challenge: asym {} bytes, sym {} bytes",
        asym.len(),
        sym.len()
    );
    Ok(ChallengeEnvelope { asym, sym })
}

fn endorsement_key(ek: &EndorsementKeyMaterial) -> Result<RsaPublicKey> {
    match ek {
        EndorsementKeyMaterial::Certificate(der) => {
            let normalized = normalize_ek_oid(der);
            Certificate::from_der(&normalized)?.rsa_public_key()
        }
        EndorsementKeyMaterial::PublicKey { modulus } => EndorsementKeyMaterial::bare_key(modulus),
    }
}

/// `TPM_ASYM_CA_CONTENTS`: `TPM_SYMMETRIC_KEY { algId, encScheme, size,
/// data }` followed by `SHA1(aik_pub)`.
fn asym_ca_contents(aes_key: &[u8], aik_pub: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + aes_key.len() + 20);
    out.extend_from_slice(&TPM_ALG_AES128.to_be_bytes());
    out.extend_from_slice(&TPM_ES_SYM_CBC_PKCS5PAD.to_be_bytes());
    out.extend_from_slice(&(aes_key.len() as u16).to_be_bytes());
    out.extend_from_slice(aes_key);
    out.extend_from_slice(&sha1_digest(aik_pub));
    out
}

/// `TPM_SYM_CA_ATTESTATION`: credential size, `TPM_KEY_PARMS` for AES-128
/// CBC, then the IV and ciphertext.
fn sym_ca_attestation(iv: &[u8], ciphertext: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(28 + iv.len() + ciphertext.len());
    out.extend_from_slice(&((ciphertext.len() + iv.len()) as u32).to_be_bytes());
    out.extend_from_slice(&TPM_ALG_AES128.to_be_bytes());
    out.extend_from_slice(&TPM_ES_SYM_CBC_PKCS5PAD.to_be_bytes());
    out.extend_from_slice(&TPM_SS_NONE.to_be_bytes());
    for parm in TPM_SYM_PARMS {
        out.extend_from_slice(&parm.to_be_bytes());
    }
    // trailing zero of the key parms
    out.extend_from_slice(&0u32.to_be_bytes());
    out.extend_from_slice(iv);
    out.extend_from_slice(ciphertext);
    out
}
