// Copyright (c) 2024 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

//! Deterministic randomness for reproducible test vectors.

use rand::{CryptoRng, Error, RngCore};

/// Replays a fixed byte stream. Panics once the stream is exhausted, so a
/// test that consumes more randomness than it planned for fails loudly.
pub struct ReplayRng {
    stream: Vec<u8>,
    pos: usize,
}

impl ReplayRng {
    pub fn new(stream: impl Into<Vec<u8>>) -> Self {
        Self {
            stream: stream.into(),
            pos: 0,
        }
    }

    /// Bytes not consumed yet.
    pub fn remaining(&self) -> usize {
        self.stream.len() - self.pos
    }
}

impl RngCore for ReplayRng {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let end = self.pos + dest.len();
        assert!(end <= self.stream.len(), "replay stream exhausted");
        dest.copy_from_slice(&self.stream[self.pos..end]);
        self.pos = end;
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for ReplayRng {}
