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

//! Module settings.
//!
//! Settings are read through an explicit `SettingsStore` collaborator that
//! is constructed once per session and passed into the controller; nothing
//! here touches ambient process state.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::path::Path;

use crate::errors::{ConfigError, StoreError};

/// Recognized settings keys.
pub mod keys {
    pub const MAIL_SERVER_HOST: &str = "mail_server_host";
    pub const MAIL_SERVER_USER: &str = "mail_server_user";
    pub const MAIL_SERVER_PASS: &str = "mail_server_pass";
    pub const CODE_LENGTH: &str = "code_length";
    pub const PERMIT_BYPASS: &str = "permit_bypass";
}

pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Key-value settings collaborator.
///
/// `Ok(None)` means the key is absent; `Err` means the store itself could
/// not be opened or parsed.
pub trait SettingsStore: Send + Sync {
    fn get_str(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn get_int(&self, key: &str) -> Result<Option<i64>, StoreError>;
    fn get_bool(&self, key: &str) -> Result<Option<bool>, StoreError>;
}

/// Mail submission endpoint. Supplied to the transmitter once per send,
/// not retained. TLS is unconditionally mandatory, so there is no flag to
/// disable it.
#[derive(Debug, Clone)]
pub struct MailServerConfig {
    pub host: String,
    pub username: String,
    pub password: String,
}

/// Settings for one authentication attempt, loaded up front.
#[derive(Debug, Clone)]
pub struct ModuleConfig {
    pub code_length: NonZeroUsize,
    pub permit_bypass: bool,
    pub mail: MailServerConfig,
}

impl ModuleConfig {
    /// Load settings. The three mail-server keys are required;
    /// `code_length` defaults to 8 and `permit_bypass` to false.
    pub fn load(store: &dyn SettingsStore) -> Result<Self, ConfigError> {
        let host = require_str(store, keys::MAIL_SERVER_HOST)?;
        let username = require_str(store, keys::MAIL_SERVER_USER)?;
        let password = require_str(store, keys::MAIL_SERVER_PASS)?;

        let code_length = match store.get_int(keys::CODE_LENGTH)? {
            None => NonZeroUsize::new(DEFAULT_CODE_LENGTH).unwrap_or(NonZeroUsize::MIN),
            Some(n) => usize::try_from(n)
                .ok()
                .and_then(NonZeroUsize::new)
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: keys::CODE_LENGTH,
                    reason: format!("must be a positive integer, got {n}"),
                })?,
        };

        let permit_bypass = store.get_bool(keys::PERMIT_BYPASS)?.unwrap_or(false);

        Ok(Self {
            code_length,
            permit_bypass,
            mail: MailServerConfig {
                host,
                username,
                password,
            },
        })
    }
}

fn require_str(store: &dyn SettingsStore, key: &'static str) -> Result<String, ConfigError> {
    store.get_str(key)?.ok_or(ConfigError::MissingKey(key))
}

/// Settings backed by a YAML file with top-level scalar keys.
#[derive(Debug)]
pub struct YamlSettings {
    doc: serde_yaml_ng::Value,
}

impl YamlSettings {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let text = std::fs::read_to_string(path).map_err(StoreError::Open)?;
        let doc = serde_yaml_ng::from_str(&text).map_err(|e| StoreError::Parse(e.to_string()))?;
        Ok(Self { doc })
    }

    fn value(&self, key: &str) -> Option<&serde_yaml_ng::Value> {
        self.doc.get(key)
    }
}

impl SettingsStore for YamlSettings {
    fn get_str(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.value(key) {
            None => Ok(None),
            Some(v) => v
                .as_str()
                .map(|s| Some(s.to_owned()))
                .ok_or_else(|| StoreError::Parse(format!("key '{key}' is not a string"))),
        }
    }

    fn get_int(&self, key: &str) -> Result<Option<i64>, StoreError> {
        match self.value(key) {
            None => Ok(None),
            Some(v) => v
                .as_i64()
                .map(Some)
                .ok_or_else(|| StoreError::Parse(format!("key '{key}' is not an integer"))),
        }
    }

    fn get_bool(&self, key: &str) -> Result<Option<bool>, StoreError> {
        match self.value(key) {
            None => Ok(None),
            // Accept 0/1 as well; deployments migrating from integer flags
            // keep working.
            Some(v) => v
                .as_bool()
                .or_else(|| v.as_i64().map(|n| n != 0))
                .map(Some)
                .ok_or_else(|| StoreError::Parse(format!("key '{key}' is not a boolean"))),
        }
    }
}

/// In-memory settings for tests and embedding hosts that already hold
/// their configuration.
#[derive(Debug, Default, Clone)]
pub struct MemorySettings {
    strings: HashMap<String, String>,
    ints: HashMap<String, i64>,
    bools: HashMap<String, bool>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_str(mut self, key: &str, value: &str) -> Self {
        self.strings.insert(key.to_owned(), value.to_owned());
        self
    }

    pub fn with_int(mut self, key: &str, value: i64) -> Self {
        self.ints.insert(key.to_owned(), value);
        self
    }

    pub fn with_bool(mut self, key: &str, value: bool) -> Self {
        self.bools.insert(key.to_owned(), value);
        self
    }
}

impl SettingsStore for MemorySettings {
    fn get_str(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.strings.get(key).cloned())
    }

    fn get_int(&self, key: &str) -> Result<Option<i64>, StoreError> {
        Ok(self.ints.get(key).copied())
    }

    fn get_bool(&self, key: &str) -> Result<Option<bool>, StoreError> {
        Ok(self.bools.get(key).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn mail_settings() -> MemorySettings {
        MemorySettings::new()
            .with_str(keys::MAIL_SERVER_HOST, "smtp.example.com")
            .with_str(keys::MAIL_SERVER_USER, "aurora@example.com")
            .with_str(keys::MAIL_SERVER_PASS, "hunter2")
    }

    #[test]
    fn defaults_apply_when_optional_keys_are_absent() {
        let config = ModuleConfig::load(&mail_settings()).unwrap();
        assert_eq!(config.code_length.get(), 8);
        assert!(!config.permit_bypass);
        assert_eq!(config.mail.host, "smtp.example.com");
    }

    #[test]
    fn missing_mail_server_key_is_rejected() {
        let store = MemorySettings::new()
            .with_str(keys::MAIL_SERVER_HOST, "smtp.example.com")
            .with_str(keys::MAIL_SERVER_USER, "aurora@example.com");
        let err = ModuleConfig::load(&store).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey(k) if k == keys::MAIL_SERVER_PASS));
    }

    #[test]
    fn non_positive_code_length_is_a_config_error() {
        for bad in [0, -3] {
            let store = mail_settings().with_int(keys::CODE_LENGTH, bad);
            let err = ModuleConfig::load(&store).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == keys::CODE_LENGTH));
        }
    }

    #[test]
    fn explicit_values_override_defaults() {
        let store = mail_settings()
            .with_int(keys::CODE_LENGTH, 6)
            .with_bool(keys::PERMIT_BYPASS, true);
        let config = ModuleConfig::load(&store).unwrap();
        assert_eq!(config.code_length.get(), 6);
        assert!(config.permit_bypass);
    }

    #[test]
    fn yaml_settings_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "mail_server_host: smtp.example.com\n\
             mail_server_user: aurora@example.com\n\
             mail_server_pass: hunter2\n\
             code_length: 6\n\
             permit_bypass: 1"
        )
        .unwrap();

        let store = YamlSettings::open(file.path()).unwrap();
        let config = ModuleConfig::load(&store).unwrap();
        assert_eq!(config.code_length.get(), 6);
        assert!(config.permit_bypass);
        assert_eq!(config.mail.username, "aurora@example.com");
    }

    #[test]
    fn yaml_settings_open_fails_for_missing_file() {
        let err = YamlSettings::open("/nonexistent/aurora/email.yaml").unwrap_err();
        assert!(matches!(err, StoreError::Open(_)));
    }

    #[test]
    fn yaml_settings_parse_failure_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mail_server_host: [unclosed").unwrap();
        let err = YamlSettings::open(file.path()).unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }

    #[test]
    fn wrong_yaml_type_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mail_server_host: [a, b]").unwrap();
        let store = YamlSettings::open(file.path()).unwrap();
        assert!(matches!(
            store.get_str(keys::MAIL_SERVER_HOST),
            Err(StoreError::Parse(_))
        ));
    }
}
