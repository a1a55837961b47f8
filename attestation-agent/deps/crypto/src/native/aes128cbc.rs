// Copyright (c) 2022 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

//! This mod implements aes-128-cbc encryption & decryption.

use openssl::symm::Cipher;

use crate::{Error, Result};

pub fn decrypt(encrypted_data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    let cipher = Cipher::aes_128_cbc();
    check_lengths(cipher, key, iv)?;
    openssl::symm::decrypt(cipher, key, Some(iv), encrypted_data)
        .map_err(|e| Error::Cipher(e.to_string()))
}

pub fn encrypt(data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    let cipher = Cipher::aes_128_cbc();
    check_lengths(cipher, key, iv)?;
    openssl::symm::encrypt(cipher, key, Some(iv), data).map_err(|e| Error::Cipher(e.to_string()))
}

// OpenSSL silently truncates or zero-extends mismatched keys
fn check_lengths(cipher: Cipher, key: &[u8], iv: &[u8]) -> Result<()> {
    if key.len() != cipher.key_len() || Some(iv.len()) != cipher.iv_len() {
        return Err(Error::Cipher("invalid key or iv length".into()));
    }
    Ok(())
}
