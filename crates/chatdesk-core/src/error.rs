// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the chatdesk client.

use thiserror::Error;

/// The primary error type used across the backend adapter and orchestration layer.
#[derive(Debug, Error)]
pub enum ChatdeskError {
    /// Configuration errors (invalid TOML, bad base URL, out-of-range values).
    #[error("configuration error: {0}")]
    Config(String),

    /// The request never produced an HTTP response (connect, DNS, TLS, body read).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend answered with a non-success status code.
    #[error("backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    /// The backend answered, but the body was not the expected JSON shape.
    #[error("failed to decode backend response: {message}")]
    Decode {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ChatdeskError {
    /// Builds a [`ChatdeskError::Transport`] from any error source.
    pub fn transport<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Builds a [`ChatdeskError::Decode`] from any error source.
    pub fn decode<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Decode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
