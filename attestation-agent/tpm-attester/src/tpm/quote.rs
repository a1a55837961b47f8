// Copyright (c) 2024 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

//! TPM 1.2 quote verification.

use std::collections::BTreeMap;

use crypto::encoding::ceil_div;
use crypto::sha1_digest;
use log::{debug, warn};
use rsa::traits::PublicKeyParts;
use rsa::Pss;
use sha1::Sha1;

use crate::{AttestationError, Result, RsaKeyMaterial};

/// SHA-1 PCR value.
pub type PcrValue = [u8; 20];

/// Offset of `compositeHash` inside `TPM_QUOTE_INFO`.
const COMPOSITE_HASH_RANGE: std::ops::Range<usize> = 8..28;

const SHA1_LEN: usize = 20;

/// Number of PCRs addressable by a TPM 1.2 selection.
pub const PCR_COUNT: u32 = 32;

/// `TPM_PCR_COMPOSITE` rebuilt from a PCR snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcrComposite {
    selection: u32,
    max_index: u32,
    values: Vec<u8>,
}

impl PcrComposite {
    pub fn new(pcrs: &BTreeMap<u32, PcrValue>) -> Result<Self> {
        let mut selection = 0u32;
        let mut max_index = 0;
        let mut values = Vec::with_capacity(pcrs.len() * SHA1_LEN);

        // BTreeMap iterates in ascending index order
        for (&index, value) in pcrs {
            if index >= PCR_COUNT {
                return Err(AttestationError::InvalidPcrIndex(index));
            }
            selection |= 1 << index;
            max_index = index;
            values.extend_from_slice(value);
        }

        Ok(Self {
            selection,
            max_index,
            values,
        })
    }

    /// Serialized composite. The size fields are big-endian while the
    /// selection bitmap is written in host byte order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(10 + self.values.len());
        if self.max_index < 16 {
            out.extend_from_slice(&2u16.to_be_bytes());
            out.extend_from_slice(&(self.selection as u16).to_ne_bytes());
        } else {
            out.extend_from_slice(&4u16.to_be_bytes());
            out.extend_from_slice(&self.selection.to_ne_bytes());
        }
        out.extend_from_slice(&(self.values.len() as u32).to_be_bytes());
        out.extend_from_slice(&self.values);
        out
    }

    pub fn digest(&self) -> PcrValue {
        sha1_digest(&self.to_bytes())
    }
}

/// Verify a `TPM_Quote` made with an AIK.
///
/// Returns `Ok(true)` only if `signature` is a valid RSASSA-PSS signature
/// (MGF1/SHA-1, maximal salt) over `SHA1(quote_info)` and the composite
/// digest in `quote_info` matches `pcr_values`. Input that cannot be a quote
/// at all is an error.
pub fn quote_verify(
    quote_info: &[u8],
    signature: &[u8],
    aik_pubkey: &RsaKeyMaterial,
    pcr_values: &BTreeMap<u32, PcrValue>,
) -> Result<bool> {
    if quote_info.len() < COMPOSITE_HASH_RANGE.end {
        return Err(AttestationError::MalformedQuote(quote_info.len()));
    }
    let composite = PcrComposite::new(pcr_values)?;

    let digest = sha1_digest(quote_info);

    let key = match aik_pubkey.to_public_key() {
        Ok(key) => key,
        Err(e) => {
            warn!("Unusable AIK public key: {e}");
            return Ok(false);
        }
    };

    // emLen - hLen - 2
    let em_len = ceil_div(key.n().bits() - 1, 8)?;
    let Some(salt_len) = em_len.checked_sub(SHA1_LEN + 2) else {
        warn!("AIK modulus of {} bits is too small for PSS", key.n().bits());
        return Ok(false);
    };

    // The signer hashes the quote digest once more, so the PSS message
    // hash is SHA1(SHA1(quote_info)).
    let scheme = Pss::new_with_salt::<Sha1>(salt_len);
    if let Err(e) = key.verify(scheme, &sha1_digest(&digest), signature) {
        debug!("Quote signature rejected: {e}");
        return Ok(false);
    }

    if composite.digest()[..] != quote_info[COMPOSITE_HASH_RANGE] {
        debug!("Quote composite hash does not match the supplied PCR values");
        return Ok(false);
    }

    Ok(true)
}
