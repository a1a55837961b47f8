// Copyright (c) 2024 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

//! The TCG variant of OAEP used by TPM 1.2 (`TPM_ES_RSAESOAEP_SHA1_MGF1`).
//!
//! Unlike PKCS#1 OAEP the label is the fixed string `"TCPA"` and the seed
//! and label hash always occupy 20 bytes each.
//!
//! ```text
//! 0      1        21           41
//! +------+--------+------------+---------+------+-----------+
//! | 0x00 |  seed  | SHA1(TCPA) | 00 .. 00| 0x01 | plaintext |
//! +------+--------+------------+---------+------+-----------+
//!          masked  \_______________ masked ________________/
//! ```

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::algorithms::sha1_digest;
use crate::mgf::mgf1;
use crate::{Error, HashAlgorithm, Result};

pub const TPM_OAEP_LABEL: &[u8] = b"TCPA";

const SEED_LEN: usize = 20;
const DB_OFFSET: usize = 1 + SEED_LEN;
const HEADER_LEN: usize = DB_OFFSET + SEED_LEN;

/// Pad `plaintext` into a `key_len` byte block, drawing the seed from `rng`.
pub fn tpm_oaep<R: RngCore + CryptoRng>(
    plaintext: &[u8],
    key_len: usize,
    rng: &mut R,
) -> Result<Vec<u8>> {
    // 0x01 separator plus the fixed header
    if plaintext.len() + 1 + HEADER_LEN > key_len {
        return Err(Error::PlaintextTooLarge {
            len: plaintext.len(),
            key_len,
        });
    }

    let mut seed = [0u8; SEED_LEN];
    rng.fill_bytes(&mut seed);

    let mut block = vec![0u8; key_len];
    block[1..DB_OFFSET].copy_from_slice(&seed);
    block[DB_OFFSET..HEADER_LEN].copy_from_slice(&sha1_digest(TPM_OAEP_LABEL));
    block[key_len - plaintext.len() - 1] = 0x01;
    block[key_len - plaintext.len()..].copy_from_slice(plaintext);

    let db_mask = mgf1(&seed, key_len - DB_OFFSET, HashAlgorithm::Sha1)?;
    xor_in_place(&mut block[DB_OFFSET..], &db_mask);

    let seed_mask = mgf1(&block[DB_OFFSET..], SEED_LEN, HashAlgorithm::Sha1)?;
    xor_in_place(&mut block[1..DB_OFFSET], &seed_mask);

    Ok(block)
}

/// [`tpm_oaep`] with the operating system RNG.
pub fn tpm_oaep_random(plaintext: &[u8], key_len: usize) -> Result<Vec<u8>> {
    tpm_oaep(plaintext, key_len, &mut OsRng)
}

fn xor_in_place(dst: &mut [u8], mask: &[u8]) {
    dst.iter_mut().zip(mask).for_each(|(d, m)| *d ^= m);
}
