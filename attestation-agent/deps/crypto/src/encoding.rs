// Copyright (c) 2024 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

//! Integer to octet string conversion (RFC 8017 section 4).

use rsa::BigUint;

use crate::{Error, Result};

/// `⌈a / b⌉` for non-negative integers.
pub fn ceil_div(a: usize, b: usize) -> Result<usize> {
    if b == 0 {
        return Err(Error::InvalidArgument("ceil_div divisor must be positive"));
    }
    Ok(a / b + usize::from(a % b != 0))
}

/// Encode `x` big-endian into exactly `length` bytes, left padded with zeros.
pub fn i2osp(x: &BigUint, length: usize) -> Result<Vec<u8>> {
    let bytes = x.to_bytes_be();
    // to_bytes_be() yields [0] for zero
    let bytes: &[u8] = if bytes == [0] { &[] } else { &bytes };
    if bytes.len() > length {
        return Err(Error::IntegerTooLarge(length));
    }

    let mut out = vec![0u8; length];
    out[length - bytes.len()..].copy_from_slice(bytes);
    Ok(out)
}

/// Big-endian octet string to integer.
pub fn os2ip(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}
