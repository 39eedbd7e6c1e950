/*
 * Trustpilot Invitations - A client for the Trustpilot invitation API
 * Copyright (C) 2025 Josh Kropf <josh@slashdev.ca>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use thiserror::Error;

/// Failures raised while sending a request or reading its response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response body is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("request body could not be encoded: {0}")]
    Encode(#[source] serde_json::Error)
}

impl TransportError {
    /// HTTP status of the failed exchange, when the server got far enough to send one
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Request(e) => e.status().map(|s| s.as_u16()),
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Decode(_) | TransportError::Encode(_) => None
        }
    }
}

/// The single error type returned by every [`crate::InvitationClient`] operation.
#[derive(Debug, Error)]
pub enum InvitationError {
    /// Input rejected before any request was sent
    #[error("{0}")]
    Validation(String),

    /// The request could not be completed, `source` holds the original failure
    #[error("{message}")]
    Transport {
        message: String,
        code: Option<u16>,
        #[source]
        source: TransportError
    }
}

impl InvitationError {
    pub fn code(&self) -> Option<u16> {
        match self {
            InvitationError::Validation(_) => None,
            InvitationError::Transport { code, .. } => *code
        }
    }
}

impl From<TransportError> for InvitationError {
    fn from(source: TransportError) -> Self {
        InvitationError::Transport {
            message: source.to_string(),
            code: source.status(),
            source
        }
    }
}
