// Copyright (c) 2024 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

//! EK certificate as stored in TPM NVRAM (TCG PC Client spec, 7.4.4).
//!
//! ```text
//! u16 tag = 0x1001 | u8 cert type | u16 length | [u16 0x1002] | DER ...
//! ```

use crate::{AttestationError, Result};

/// `TSS_NV_DEFINED | TPM_NV_INDEX_EKCert`
pub const EK_CERT_NV_INDEX: u32 = 0x8000_f000;

const TAG_PCCLIENT_STORED_CERT: u16 = 0x1001;
const TAG_PCCLIENT_FULL_CERT: u16 = 0x1002;
const FULL_CERT: u8 = 0x00;
const DER_SEQUENCE: u8 = 0x30;
const HEADER_LEN: usize = 5;

/// Strip the NV header and return the DER certificate.
pub fn parse_ek_nv_blob(blob: &[u8]) -> Result<Vec<u8>> {
    if blob.len() < HEADER_LEN + 2 {
        return Err(AttestationError::MalformedCertificate(format!(
            "EK NV blob is only {} bytes",
            blob.len()
        )));
    }

    let tag = u16::from_be_bytes([blob[0], blob[1]]);
    if tag != TAG_PCCLIENT_STORED_CERT {
        return Err(AttestationError::InvalidTag(tag));
    }

    if blob[2] != FULL_CERT {
        return Err(AttestationError::NotFullCertificate(blob[2]));
    }

    let mut len = usize::from(u16::from_be_bytes([blob[3], blob[4]]));
    let mut offset = HEADER_LEN;

    if u16::from_be_bytes([blob[offset], blob[offset + 1]]) == TAG_PCCLIENT_FULL_CERT {
        offset += 2;
        len = len.checked_sub(2).ok_or_else(|| {
            AttestationError::MalformedCertificate("EK length shorter than its tag".into())
        })?;
    } else if blob[offset] != DER_SEQUENCE {
        return Err(AttestationError::InvalidHeader(blob[offset]));
    }

    let cert = blob.get(offset..offset + len).ok_or_else(|| {
        AttestationError::MalformedCertificate(format!(
            "EK certificate claims {len} bytes, {} available",
            blob.len() - offset
        ))
    })?;

    Ok(cert.to_vec())
}
