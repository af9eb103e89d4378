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

//! Error taxonomy for the authentication core.
//!
//! One enum per failure class. Every lower-layer error is converted into a
//! terminal rejection by the session controller; the single exception is
//! `TransmitError`, which the bypass policy may absorb.

use std::fmt;

use thiserror::Error;

/// Failure of a key-value store collaborator (settings or directory file).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unable to open store: {0}")]
    Open(#[source] std::io::Error),
    #[error("unable to parse store: {0}")]
    Parse(String),
}

/// Failure while loading the module settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to open settings: {0}")]
    Open(#[source] std::io::Error),
    #[error("unable to parse settings: {0}")]
    Parse(String),
    #[error("missing required key '{0}'")]
    MissingKey(&'static str),
    #[error("invalid value for key '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

impl From<StoreError> for ConfigError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Open(e) => ConfigError::Open(e),
            StoreError::Parse(e) => ConfigError::Parse(e),
        }
    }
}

/// Failure while resolving a login to an email address.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("unable to open directory: {0}")]
    Open(#[source] std::io::Error),
    #[error("unable to parse directory: {0}")]
    Parse(String),
    #[error("no email recorded for login '{0}'")]
    NotFound(String),
    #[error("stored email address exceeds {max} characters", max = crate::directory::MAX_EMAIL_LEN)]
    TooLong,
}

impl From<StoreError> for DirectoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Open(e) => DirectoryError::Open(e),
            StoreError::Parse(e) => DirectoryError::Parse(e),
        }
    }
}

/// The entropy source could not supply bytes.
#[derive(Debug, Error)]
pub enum RandomnessError {
    #[error("randomness source unavailable: {0}")]
    Unavailable(String),
}

/// Failure of the single mail submission attempt. Wraps the underlying
/// cause; there is no retry and no partial-success state.
#[derive(Debug, Error)]
pub enum TransmitError {
    #[error("invalid mailbox address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("invalid envelope: {0}")]
    Envelope(#[from] lettre::error::Error),
    #[error("smtp submission failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    /// Reported by non-SMTP transmitter implementations.
    #[error("submission failed: {0}")]
    Failed(String),
}

/// The prompt/response exchange with the user broke down.
#[derive(Debug, Error)]
#[error("conversation exchange failed: {0}")]
pub struct ConversationError(pub String);

/// The submitted code did not pass verification.
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("submitted code does not match")]
    Mismatch,
    #[error("empty response not permitted")]
    EmptyDisallowed,
}

/// Failure of the identity collaborator. The host's own failure code is
/// carried through unchanged.
#[derive(Debug)]
pub struct IdentityError {
    pub code: i32,
    pub message: String,
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "identity lookup failed (code {}): {}", self.code, self.message)
    }
}

impl std::error::Error for IdentityError {}

/// Umbrella error attached to a rejected verdict as a diagnostic.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Randomness(#[from] RandomnessError),
    #[error(transparent)]
    Transmit(#[from] TransmitError),
    #[error(transparent)]
    Verification(#[from] VerificationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_maps_into_config_and_directory_kinds() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let cfg: ConfigError = StoreError::Open(io).into();
        assert!(matches!(cfg, ConfigError::Open(_)));

        let dir: DirectoryError = StoreError::Parse("bad yaml".into()).into();
        assert!(matches!(dir, DirectoryError::Parse(_)));
    }

    #[test]
    fn directory_too_long_mentions_the_ceiling() {
        let msg = DirectoryError::TooLong.to_string();
        assert!(msg.contains("320"));
    }

    #[test]
    fn auth_error_is_transparent() {
        let err: AuthError = VerificationError::Mismatch.into();
        assert_eq!(err.to_string(), "submitted code does not match");
    }
}
