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

//! Attempt audit logging.
//!
//! Emits one structured entry per attempt lifecycle event on the `audit`
//! tracing target, with a canonical JSON payload.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

#[derive(Serialize)]
struct AuditEntry<'a> {
    attempt_id: &'a str,
    timestamp: f64,
    event_type: &'a str,
    details: serde_json::Value,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AuditLogger;

impl AuditLogger {
    pub fn new() -> Self {
        Self
    }

    pub fn log(&self, attempt_id: &Uuid, event_type: &str, details: serde_json::Value) {
        let id = attempt_id.to_string();
        let entry = AuditEntry {
            attempt_id: &id,
            timestamp: now(),
            event_type,
            details,
        };

        let payload = serde_json::to_string(&entry).unwrap_or_default();
        info!(target: "audit", payload = %payload, "AUTH_AUDIT_LOG");
    }
}

fn now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}
