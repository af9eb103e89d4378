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

//! Email transmission.
//!
//! One authenticated, TLS-mandatory submission per message: exactly one
//! sender, one recipient, one attempt. Failures wrap the underlying
//! cause; there is no retry and no partial-success state.

use async_trait::async_trait;
use lettre::address::{Address, Envelope};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::debug;

use crate::config::MailServerConfig;
use crate::errors::TransmitError;
use crate::mail::message::EmailMessage;

/// Delivers a composed message over the mail-submission channel.
#[async_trait]
pub trait CodeTransmitter: Send + Sync {
    async fn send(
        &self,
        message: &EmailMessage,
        server: &MailServerConfig,
    ) -> Result<(), TransmitError>;
}

/// SMTP transmitter. The session is TLS-wrapped from the first byte;
/// there is no plaintext fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct SmtpTransmitter;

#[async_trait]
impl CodeTransmitter for SmtpTransmitter {
    async fn send(
        &self,
        message: &EmailMessage,
        server: &MailServerConfig,
    ) -> Result<(), TransmitError> {
        let sender: Address = message.sender.parse()?;
        let recipient: Address = message.recipient.as_str().parse()?;
        let envelope = Envelope::new(Some(sender), vec![recipient])?;

        // Drain the single-pass line stream into the outbound payload.
        let mut payload = String::new();
        for line in message.lines() {
            payload.push_str(&line);
        }

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&server.host)?
            .credentials(Credentials::new(
                server.username.clone(),
                server.password.clone(),
            ))
            .build();

        transport.send_raw(&envelope, payload.as_bytes()).await?;
        debug!(message_id = %message.message_id, "code email accepted for delivery");
        Ok(())
    }
}
