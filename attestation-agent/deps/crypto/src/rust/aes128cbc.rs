// Copyright (c) 2022 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

//! This mod implements aes-128-cbc encryption & decryption.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::Aes128;

use crate::{Error, Result};

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

pub fn decrypt(encrypted_data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    let decryptor =
        Aes128CbcDec::new_from_slices(key, iv).map_err(|e| Error::Cipher(e.to_string()))?;
    decryptor
        .decrypt_padded_vec_mut::<Pkcs7>(encrypted_data)
        .map_err(|e| Error::Cipher(e.to_string()))
}

pub fn encrypt(data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    let encryptor =
        Aes128CbcEnc::new_from_slices(key, iv).map_err(|e| Error::Cipher(e.to_string()))?;
    Ok(encryptor.encrypt_padded_vec_mut::<Pkcs7>(data))
}
