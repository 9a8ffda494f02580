//! Error types for the cinema API client

use thiserror::Error;

/// Errors that can occur when talking to the booking service
///
/// Every variant carries owned strings so the error can travel inside an
/// action and be cloned into view-state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (connection, timeout)
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server refused the request (4xx)
    #[error("Request rejected (status {status})")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Message from the `error` or `message` field of the body
        message: Option<String>,
    },

    /// The server failed unexpectedly (5xx or any other non-success status)
    #[error("Server error (status {status})")]
    Server {
        /// HTTP status code
        status: u16,
        /// Message from the `error` or `message` field of the body
        message: Option<String>,
    },

    /// The body could not be decoded or normalized
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Build the error for a non-success status and its raw body
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_message(body);
        if (400..500).contains(&status) {
            Self::Rejected { status, message }
        } else {
            Self::Server { status, message }
        }
    }

    /// Message supplied by the server, if any
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } | Self::Server { message, .. } => message.as_deref(),
            Self::Transport(_) | Self::InvalidResponse(_) => None,
        }
    }

    /// HTTP status, when the server answered
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::Transport(_) | Self::InvalidResponse(_) => None,
        }
    }

    /// Text to show the user: the server's message, else `fallback`
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

/// Pull a human-readable message out of an error body
///
/// `error` wins over `message`; blank strings count as absent.
fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .filter_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(ToString::to_string)
}
