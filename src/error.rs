//! Error handling for the marketplace client

use std::fmt;
use thiserror::Error;

/// Broad classification of a backend-declared failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 401/403: no session, or a session without the needed role
    Unauthorized,
    /// 404
    NotFound,
    /// 400/422: the backend rejected the payload
    Validation,
    /// Any other failure status, or `success:false` on a 2xx
    Server,
}

impl ErrorKind {
    /// Classify an HTTP status code
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ErrorKind::Unauthorized,
            404 => ErrorKind::NotFound,
            400 | 422 => ErrorKind::Validation,
            _ => ErrorKind::Server,
        }
    }
}

/// Unified error type for the marketplace client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or transport errors (the request never produced a response)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The backend answered with a failure status or a failure envelope
    #[error("{message}")]
    Api {
        status: u16,
        kind: ErrorKind,
        message: String,
    },

    /// Client-side validation failed; no request was issued
    #[error("{0}")]
    Validation(String),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a backend-declared error, classified by status
    pub fn api<T: fmt::Display>(status: u16, msg: T) -> Self {
        Error::Api {
            status,
            kind: ErrorKind::from_status(status),
            message: msg.to_string(),
        }
    }

    /// Create a new validation error
    pub fn validation<T: fmt::Display>(msg: T) -> Self {
        Error::Validation(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }

    /// Kind of a backend-declared error, `None` for transport and local errors
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Api { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Whether the backend refused the call for lack of a valid session
    pub fn is_unauthorized(&self) -> bool {
        self.kind() == Some(ErrorKind::Unauthorized)
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
