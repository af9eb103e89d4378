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

//! Non-authentication host entry points.
//!
//! The module only implements the authentication management group. The
//! remaining hooks the host framework may invoke answer with a constant
//! status and perform no work.

/// Status returned to the host for a non-authentication hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStatus {
    Success,
    AuthError,
}

/// Credential refresh is not applicable to an emailed one-time code;
/// always reports success.
pub fn refresh_credentials() -> HostStatus {
    HostStatus::Success
}

/// Account management is out of scope; always reports failure.
pub fn manage_account() -> HostStatus {
    HostStatus::AuthError
}
