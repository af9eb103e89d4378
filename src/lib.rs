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

//! aurora-otp: an email-delivered one-time-passcode second factor.
//!
//! This library implements the core of an authentication module that
//! generates a short numeric code, emails it to the user's registered
//! address, and verifies the code typed back. The embedding host supplies
//! the identity and conversation collaborators; everything else, from the
//! settings and directory stores to the SMTP submission, lives here.

pub mod audit;
pub mod config;
pub mod directory;
pub mod errors;
pub mod host;
pub mod mail;
pub mod otp;
pub mod session;
