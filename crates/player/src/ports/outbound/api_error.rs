//! Transport-level failures of the session server API

use thiserror::Error;

/// Errors returned by the HTTP boundary and the session gateway
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Connection refused, DNS failure, reset, ...
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Request timed out")]
    Timeout,

    /// Server answered with a non-2xx status. `detail` is the server's
    /// `{"detail": ...}` message when it sent one, otherwise the raw body.
    #[error("HTTP {status}: {detail}")]
    HttpError { status: u16, detail: String },

    /// Body could not be decoded into the expected shape
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Failed to serialize request: {0}")]
    SerializeError(String),
}

impl ApiError {
    pub fn http(status: u16, detail: impl Into<String>) -> Self {
        Self::HttpError {
            status,
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Server refused the request as invalid (e.g. nothing left to undo).
    pub fn is_bad_request(&self) -> bool {
        self.status() == Some(400)
    }
}
