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

//! Auth session controller.
//!
//! Orchestrates one authentication attempt as a single sequential flow:
//! settings, identity, code generation, directory lookup, transmission,
//! prompt, verification. Each session traverses the state graph exactly
//! once; terminal outcomes are audit-logged. It is pure orchestration and
//! does not know about files, sockets, or the host framework's wire types.

use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::audit::AuditLogger;
use crate::config::{ModuleConfig, SettingsStore};
use crate::directory::{self, DirectoryStore};
use crate::errors::{AuthError, ConfigError, ConversationError, DirectoryError, IdentityError,
    VerificationError};
use crate::mail::message::EmailMessage;
use crate::mail::transmitter::CodeTransmitter;
use crate::otp::{self, RandomnessProvider};
use crate::session::conversation::{code_prompt, notices, Conversation, IdentitySource};

/// Position of a session in the attempt graph. No state is revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Start,
    ConfigLoaded,
    Identified,
    CodeGenerated,
    EmailSent,
    EmailFailed,
    BypassGranted,
    PromptPending,
    Verified,
    Rejected,
}

/// Host-supplied attempt flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthFlags {
    /// Reject an empty response instead of comparing it.
    pub disallow_null_input: bool,
}

/// Terminal outcome exposed to the host.
#[derive(Debug)]
pub enum Verdict {
    /// Verified, or transmission failure absorbed by the bypass policy.
    Success,
    /// Authentication rejected; the internal error kind is attached as a
    /// diagnostic.
    Rejected(AuthError),
    /// The prompt/response exchange itself broke down.
    ConversationFailed(ConversationError),
    /// The identity collaborator failed; its own code passes through.
    IdentityFailed(IdentityError),
}

impl Verdict {
    pub fn is_success(&self) -> bool {
        matches!(self, Verdict::Success)
    }
}

/// Runs one authentication attempt over injected collaborators.
pub struct SessionController<'a> {
    settings: &'a dyn SettingsStore,
    directory: &'a dyn DirectoryStore,
    randomness: &'a dyn RandomnessProvider,
    transmitter: &'a dyn CodeTransmitter,
    audit: AuditLogger,
}

impl<'a> SessionController<'a> {
    pub fn new(
        settings: &'a dyn SettingsStore,
        directory: &'a dyn DirectoryStore,
        randomness: &'a dyn RandomnessProvider,
        transmitter: &'a dyn CodeTransmitter,
    ) -> Self {
        Self {
            settings,
            directory,
            randomness,
            transmitter,
            audit: AuditLogger::new(),
        }
    }

    /// Execute the attempt. The flow blocks only on the transmission and
    /// the conversation exchange; callers needing a deadline should wrap
    /// the returned future.
    pub async fn authenticate(
        &self,
        identity: &mut dyn IdentitySource,
        conversation: &mut dyn Conversation,
        flags: AuthFlags,
    ) -> Verdict {
        let attempt_id = Uuid::new_v4();
        let mut state = SessionState::Start;
        self.audit.log(&attempt_id, "AttemptStart", json!({}));

        // Start -> ConfigLoaded
        let config = match ModuleConfig::load(self.settings) {
            Ok(config) => config,
            Err(err) => {
                return self.reject(conversation, &attempt_id, err.into()).await;
            }
        };
        advance(&mut state, SessionState::ConfigLoaded);
        debug!(
            code_length = config.code_length.get(),
            permit_bypass = config.permit_bypass,
            "settings loaded"
        );

        // ConfigLoaded -> Identified
        let login = match identity.login().await {
            Ok(login) => login,
            Err(err) => {
                let _ = conversation.error_notice(notices::UNABLE_GET_USERNAME).await;
                warn!(code = err.code, "identity collaborator failed");
                self.audit.log(
                    &attempt_id,
                    "AttemptRejected",
                    json!({ "reason": "identity", "code": err.code }),
                );
                return Verdict::IdentityFailed(err);
            }
        };
        advance(&mut state, SessionState::Identified);

        // Identified -> CodeGenerated
        let code = match otp::generate(self.randomness, config.code_length) {
            Ok(code) => code,
            Err(err) => {
                return self.reject(conversation, &attempt_id, err.into()).await;
            }
        };
        advance(&mut state, SessionState::CodeGenerated);

        // CodeGenerated -> EmailAttempted. Any lookup failure short-circuits
        // without touching the transmitter.
        let recipient = match directory::lookup(self.directory, &login) {
            Ok(email) => email,
            Err(err) => {
                return self.reject(conversation, &attempt_id, err.into()).await;
            }
        };

        let message = EmailMessage::new(
            config.mail.username.clone(),
            recipient,
            login.clone(),
            code.clone(),
        );
        info!(
            login = %login,
            recipient = %message.recipient,
            message_id = %message.message_id,
            "transmitting code email"
        );

        match self.transmitter.send(&message, &config.mail).await {
            Ok(()) => advance(&mut state, SessionState::EmailSent),
            Err(err) => {
                advance(&mut state, SessionState::EmailFailed);
                let _ = conversation.error_notice(notices::TRANSMISSION_FAILURE).await;

                // EmailFailed is the one failure the policy may absorb:
                // with bypass permitted, the second factor is skipped
                // entirely and no prompt is issued.
                if config.permit_bypass {
                    advance(&mut state, SessionState::BypassGranted);
                    warn!(error = %err, "transmission failed; bypass permitted");
                    self.audit.log(
                        &attempt_id,
                        "BypassGranted",
                        json!({ "login": login, "error": err.to_string() }),
                    );
                    return Verdict::Success;
                }

                let _ = conversation.error_notice(notices::UNABLE_SEND_CODE).await;
                warn!(error = %err, "transmission failed; bypass not permitted");
                self.audit.log(
                    &attempt_id,
                    "AttemptRejected",
                    json!({ "reason": err.to_string() }),
                );
                advance(&mut state, SessionState::Rejected);
                return Verdict::Rejected(AuthError::Transmit(err));
            }
        }

        // EmailSent -> PromptPending
        advance(&mut state, SessionState::PromptPending);
        let response = match conversation.prompt_echo_on(&code_prompt(&login)).await {
            Ok(response) => response,
            Err(err) => {
                let _ = conversation.error_notice(notices::UNABLE_CONVERSE).await;
                warn!(error = %err, "conversation collaborator failed");
                self.audit.log(
                    &attempt_id,
                    "AttemptRejected",
                    json!({ "reason": "conversation" }),
                );
                return Verdict::ConversationFailed(err);
            }
        };

        // PromptPending -> Verified | Rejected. Exact, case-sensitive,
        // untrimmed comparison.
        match response {
            None if flags.disallow_null_input => {
                let _ = conversation.error_notice(notices::UNABLE_GET_RESPONSE).await;
                self.audit.log(
                    &attempt_id,
                    "AttemptRejected",
                    json!({ "reason": "empty response" }),
                );
                advance(&mut state, SessionState::Rejected);
                Verdict::Rejected(AuthError::Verification(VerificationError::EmptyDisallowed))
            }
            Some(input) if input == code => {
                advance(&mut state, SessionState::Verified);
                info!(login = %login, "code verified");
                self.audit
                    .log(&attempt_id, "AttemptVerified", json!({ "login": login }));
                Verdict::Success
            }
            _ => {
                let _ = conversation.error_notice(notices::WRONG_CODE).await;
                self.audit.log(
                    &attempt_id,
                    "AttemptRejected",
                    json!({ "reason": "code mismatch" }),
                );
                advance(&mut state, SessionState::Rejected);
                Verdict::Rejected(AuthError::Verification(VerificationError::Mismatch))
            }
        }
    }

    /// Notify the user, audit, and reject. Notice delivery failures are
    /// deliberately ignored here; the rejection stands either way.
    async fn reject(
        &self,
        conversation: &mut dyn Conversation,
        attempt_id: &Uuid,
        err: AuthError,
    ) -> Verdict {
        let _ = conversation.error_notice(notice_for(&err)).await;
        warn!(error = %err, "authentication rejected");
        self.audit.log(
            attempt_id,
            "AttemptRejected",
            json!({ "reason": err.to_string() }),
        );
        Verdict::Rejected(err)
    }
}

fn advance(state: &mut SessionState, next: SessionState) {
    debug!(from = ?*state, to = ?next, "session transition");
    *state = next;
}

/// Notice shown to the user for each error kind.
fn notice_for(err: &AuthError) -> &'static str {
    match err {
        AuthError::Config(ConfigError::Open(_)) => notices::UNABLE_OPEN_CONFIG,
        AuthError::Config(ConfigError::Parse(_)) => notices::UNABLE_READ_CONFIG,
        AuthError::Config(ConfigError::MissingKey(_)) => notices::MAIL_CONFIG_NOT_FOUND,
        AuthError::Config(ConfigError::InvalidValue { .. }) => notices::UNABLE_READ_CONFIG,
        AuthError::Directory(DirectoryError::Open(_)) => notices::UNABLE_OPEN_DIRECTORY,
        AuthError::Directory(DirectoryError::Parse(_)) => notices::UNABLE_READ_DIRECTORY,
        AuthError::Directory(DirectoryError::NotFound(_)) => notices::EMAIL_NOT_FOUND,
        AuthError::Directory(DirectoryError::TooLong) => notices::EMAIL_TOO_LONG,
        AuthError::Randomness(_) => notices::UNABLE_GENERATE_CODE,
        AuthError::Transmit(_) => notices::UNABLE_SEND_CODE,
        AuthError::Verification(VerificationError::Mismatch) => notices::WRONG_CODE,
        AuthError::Verification(VerificationError::EmptyDisallowed) => {
            notices::UNABLE_GET_RESPONSE
        }
    }
}
