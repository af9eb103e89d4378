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

//! Directory lookup.
//!
//! Resolves a login to a notification email address from a static,
//! read-only store. The stored value is length-checked while still
//! borrowed; an owned `EmailAddress` is only constructed afterwards.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::errors::{DirectoryError, StoreError};

/// RFC mailbox length ceiling (octets).
pub const MAX_EMAIL_LEN: usize = 320;

/// Name of the login-to-email mapping in a file-backed directory.
pub const EMAILS_SECTION: &str = "emails";

/// An email address known to fit the mailbox length ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = DirectoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.len() > MAX_EMAIL_LEN {
            return Err(DirectoryError::TooLong);
        }
        Ok(Self(value.to_owned()))
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only login-to-email collaborator.
pub trait DirectoryStore: Send + Sync {
    /// Returns the stored email for `login`, borrowed from the store so
    /// callers can validate it before taking a copy.
    fn email_for<'a>(&'a self, login: &str) -> Result<Option<&'a str>, StoreError>;
}

/// Resolve a login to its notification address.
pub fn lookup(store: &dyn DirectoryStore, login: &str) -> Result<EmailAddress, DirectoryError> {
    let stored = store
        .email_for(login)?
        .ok_or_else(|| DirectoryError::NotFound(login.to_owned()))?;
    EmailAddress::try_from(stored)
}

/// Directory backed by a YAML file with one `emails` mapping.
#[derive(Debug)]
pub struct YamlDirectory {
    doc: serde_yaml_ng::Value,
}

impl YamlDirectory {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let text = std::fs::read_to_string(path).map_err(StoreError::Open)?;
        let doc = serde_yaml_ng::from_str(&text).map_err(|e| StoreError::Parse(e.to_string()))?;
        Ok(Self { doc })
    }
}

impl DirectoryStore for YamlDirectory {
    fn email_for<'a>(&'a self, login: &str) -> Result<Option<&'a str>, StoreError> {
        Ok(self
            .doc
            .get(EMAILS_SECTION)
            .and_then(|emails| emails.get(login))
            .and_then(serde_yaml_ng::Value::as_str))
    }
}

/// In-memory directory for tests and embedding hosts.
#[derive(Debug, Default, Clone)]
pub struct MemoryDirectory {
    emails: HashMap<String, String>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_email(mut self, login: &str, email: &str) -> Self {
        self.emails.insert(login.to_owned(), email.to_owned());
        self
    }
}

impl DirectoryStore for MemoryDirectory {
    fn email_for<'a>(&'a self, login: &str) -> Result<Option<&'a str>, StoreError> {
        Ok(self.emails.get(login).map(String::as_str))
    }
}
