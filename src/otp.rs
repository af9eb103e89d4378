// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! One-time passcode generation.
//!
//! One 32-bit draw from the randomness collaborator, rendered in decimal
//! and truncated to the configured length. No bias correction and no
//! left-padding: the emitted code may be shorter than the configured
//! length, and callers must not assume a fixed width.

use std::num::NonZeroUsize;

use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::errors::RandomnessError;

/// Supplies 4 raw bytes of entropy on demand.
pub trait RandomnessProvider: Send + Sync {
    fn fill_four(&self, buf: &mut [u8; 4]) -> Result<(), RandomnessError>;
}

/// Operating-system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandomness;

impl RandomnessProvider for OsRandomness {
    fn fill_four(&self, buf: &mut [u8; 4]) -> Result<(), RandomnessError> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| RandomnessError::Unavailable(format!("{e:?}")))
    }
}

/// Deterministic provider returning the same 4 bytes on every draw.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandomness {
    bytes: [u8; 4],
}

impl FixedRandomness {
    pub fn new(bytes: [u8; 4]) -> Self {
        Self { bytes }
    }

    /// Provider whose draw decodes to `value`.
    pub fn from_value(value: u32) -> Self {
        Self::new(value.to_ne_bytes())
    }
}

impl RandomnessProvider for FixedRandomness {
    fn fill_four(&self, buf: &mut [u8; 4]) -> Result<(), RandomnessError> {
        *buf = self.bytes;
        Ok(())
    }
}

/// Generate the OTP for one attempt: at most `length` decimal digits.
pub fn generate(
    rng: &dyn RandomnessProvider,
    length: NonZeroUsize,
) -> Result<String, RandomnessError> {
    let mut raw = [0u8; 4];
    rng.fill_four(&mut raw)?;

    // Native-endian, matching a raw 32-bit read from the entropy device.
    let value = u32::from_ne_bytes(raw);
    let mut code = value.to_string();
    code.truncate(length.get());
    Ok(code)
}
