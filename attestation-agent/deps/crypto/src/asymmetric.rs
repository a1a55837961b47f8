// Copyright (c) 2023 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

pub mod rsa {
    use ::rsa::hazmat::rsa_encrypt;
    use ::rsa::traits::PublicKeyParts;
    use ::rsa::{BigUint, RsaPublicKey};

    use crate::encoding::{i2osp, os2ip};
    use crate::{Error, Result};

    /// Public exponent of TPM 1.2 RSA keys created with default
    /// parameters, which covers every EK and AIK.
    pub const TPM_DEFAULT_EXPONENT: u32 = 0x10001;

    /// Build a public key from big-endian modulus and exponent.
    pub fn public_key(modulus: &[u8], exponent: &[u8]) -> Result<RsaPublicKey> {
        if modulus.last().map_or(true, |b| b & 1 == 0) {
            return Err(Error::Rsa("RSA modulus must be odd".into()));
        }
        Ok(RsaPublicKey::new(
            BigUint::from_bytes_be(modulus),
            BigUint::from_bytes_be(exponent),
        )?)
    }

    /// Modulus length in bytes.
    pub fn key_len(key: &RsaPublicKey) -> usize {
        key.size()
    }

    /// Textbook `m^e mod n` over an already padded block. The result is
    /// left padded to the modulus length.
    pub fn raw_encrypt(key: &RsaPublicKey, block: &[u8]) -> Result<Vec<u8>> {
        let m = os2ip(block);
        if &m >= key.n() {
            return Err(Error::Rsa("message representative out of range".into()));
        }

        let c = rsa_encrypt(key, &m)?;
        i2osp(&c, key.size())
    }

}
