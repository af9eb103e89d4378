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

//! Collaborator seams for the interactive exchange.
//!
//! The conversation collaborator pushes notices to the user and optionally
//! reads a response; the identity collaborator yields the login for the
//! current attempt. Both are supplied by the embedding host.

use async_trait::async_trait;

use crate::errors::{ConversationError, IdentityError};

/// Request/response exchange with the user being authenticated.
#[async_trait]
pub trait Conversation: Send + Sync {
    /// Push an error notice; no response is expected.
    async fn error_notice(&mut self, text: &str) -> Result<(), ConversationError>;

    /// Prompt with visible echo. `Ok(None)` means the exchange completed
    /// but the user supplied no response.
    async fn prompt_echo_on(&mut self, text: &str) -> Result<Option<String>, ConversationError>;
}

/// Yields the login for the current attempt. A failure carries the
/// host's own error code, which the controller passes through unchanged.
#[async_trait]
pub trait IdentitySource: Send + Sync {
    async fn login(&mut self) -> Result<String, IdentityError>;
}

/// User-facing notice strings.
pub mod notices {
    pub const UNABLE_OPEN_CONFIG: &str = "[ERROR] Unable to open configuration";
    pub const UNABLE_READ_CONFIG: &str = "[ERROR] Unable to read configuration";
    pub const MAIL_CONFIG_NOT_FOUND: &str = "[ERROR] Mail server configuration not found";
    pub const UNABLE_OPEN_DIRECTORY: &str = "[ERROR] Unable to open directory";
    pub const UNABLE_READ_DIRECTORY: &str = "[ERROR] Unable to read directory";
    pub const EMAIL_NOT_FOUND: &str = "[ERROR] Email not found in directory";
    pub const EMAIL_TOO_LONG: &str = "[ERROR] Email address too long (max 320 chars)";
    pub const UNABLE_GET_USERNAME: &str = "[ERROR] Unable to get username";
    pub const UNABLE_GENERATE_CODE: &str = "[ERROR] Unable to generate a code";
    pub const TRANSMISSION_FAILURE: &str = "[ERROR] Email transmission failure";
    pub const UNABLE_SEND_CODE: &str = "[ERROR] Unable to send the code";
    pub const UNABLE_CONVERSE: &str = "[ERROR] Unable to converse with PAM";
    pub const UNABLE_GET_RESPONSE: &str = "[ERROR] Unable to get the response";
    pub const WRONG_CODE: &str = "Wrong code, please try again";
}

const BANNER_WIDTH: usize = 80;

/// The code prompt: an 80-column banner followed by the input request.
/// Logins longer than 70 characters widen their line rather than being
/// truncated.
pub fn code_prompt(login: &str) -> String {
    let border = "#".repeat(BANNER_WIDTH);
    let spacer = format!("#{}#", " ".repeat(BANNER_WIDTH - 2));

    let mut prompt = String::from("\n");
    prompt.push_str(&border);
    prompt.push('\n');
    prompt.push_str(&spacer);
    prompt.push('\n');
    prompt.push_str(&format!("#    Hi {login:<70} #\n"));
    prompt.push_str(
        "#    You've just received by email a generated code.                           #\n",
    );
    prompt.push_str(
        "#    This code is only valid for the current authentication.                   #\n",
    );
    prompt.push_str(
        "#    To finish your authentication, thank you to enter this code.              #\n",
    );
    prompt.push_str(&spacer);
    prompt.push('\n');
    prompt.push_str(&border);
    prompt.push_str("\n\n");
    prompt.push_str("Please type the code: ");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_lines_are_eighty_columns() {
        let prompt = code_prompt("alice");
        let banner_lines: Vec<&str> = prompt
            .lines()
            .filter(|l| l.starts_with('#'))
            .collect();
        assert_eq!(banner_lines.len(), 8);
        for line in banner_lines {
            assert_eq!(line.len(), BANNER_WIDTH, "line: {line:?}");
        }
    }

    #[test]
    fn prompt_embeds_the_login_and_asks_for_the_code() {
        let prompt = code_prompt("alice");
        assert!(prompt.contains("#    Hi alice"));
        assert!(prompt.ends_with("Please type the code: "));
    }

    #[test]
    fn oversized_login_is_not_truncated() {
        let login = "x".repeat(90);
        let prompt = code_prompt(&login);
        assert!(prompt.contains(&login));
    }
}
