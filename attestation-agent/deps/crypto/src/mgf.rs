// Copyright (c) 2024 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

//! MGF1 mask generation (RFC 8017 appendix B.2.1).

use crate::encoding::ceil_div;
use crate::{Error, HashAlgorithm, Result};

/// Upper bound on the requested mask length, in bytes.
pub const MGF1_MAX_MASK_LEN: usize = 65536;

pub fn mgf1(seed: &[u8], mask_len: usize, hash: HashAlgorithm) -> Result<Vec<u8>> {
    if mask_len > MGF1_MAX_MASK_LEN {
        return Err(Error::MaskTooLong(mask_len));
    }

    let rounds = ceil_div(mask_len, hash.digest_len())?;
    let mut mask = Vec::with_capacity(rounds * hash.digest_len());
    let mut block = Vec::with_capacity(seed.len() + 4);
    for counter in 0..rounds as u32 {
        block.clear();
        block.extend_from_slice(seed);
        block.extend_from_slice(&counter.to_be_bytes());
        mask.extend(hash.digest(&block));
    }

    mask.truncate(mask_len);
    Ok(mask)
}
