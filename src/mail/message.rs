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

//! Notification email composition.
//!
//! The message is produced as a pull-based, single-pass line stream:
//! exactly nine CRLF-terminated lines, then end-of-stream forever. The
//! concatenation of all nine lines is the outbound header+body document.

use std::iter::FusedIterator;

use uuid::Uuid;

use crate::directory::EmailAddress;

/// Fixed Date header value, kept as-is for wire fidelity.
pub const FIXED_DATE: &str = "Mon, 29 Nov 2010 21:54:29 +1100";

/// Fixed Subject header value.
pub const SUBJECT: &str = "Your validation code";

/// Display annotation appended to the From header.
pub const FROM_DISPLAY: &str = "PAM Aurora";

/// Number of lines in the message template.
pub const LINE_COUNT: usize = 9;

/// One notification email. Built once per session and never reused.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub sender: String,
    pub recipient: EmailAddress,
    pub login: String,
    pub code: String,
    /// Random per-session identifier carried in the Message-ID header.
    pub message_id: Uuid,
}

impl EmailMessage {
    pub fn new(sender: String, recipient: EmailAddress, login: String, code: String) -> Self {
        Self {
            sender,
            recipient,
            login,
            code,
            message_id: Uuid::new_v4(),
        }
    }

    /// The message as a single-use line stream.
    pub fn lines(&self) -> MessageLines<'_> {
        MessageLines {
            message: self,
            position: 0,
        }
    }
}

/// Lazy, single-pass producer of the nine message lines.
///
/// Not restartable: once exhausted, every further pull yields `None`.
pub struct MessageLines<'a> {
    message: &'a EmailMessage,
    position: usize,
}

impl Iterator for MessageLines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let line = match self.position {
            0 => format!("Date: {FIXED_DATE}\r\n"),
            1 => format!("To: {}\r\n", self.message.recipient),
            2 => format!("From: {} ({FROM_DISPLAY})\r\n", self.message.sender),
            3 => format!("Message-ID: {}\r\n", self.message.message_id),
            4 => format!("Subject: {SUBJECT}\r\n"),
            5 | 7 => "\r\n".to_owned(),
            6 => format!("Hi {},\r\n", self.message.login),
            8 => format!("Your authentication code is {}.\r\n", self.message.code),
            _ => return None,
        };
        self.position += 1;
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = LINE_COUNT.saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl FusedIterator for MessageLines<'_> {}
