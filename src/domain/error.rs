//! Error types for the KnowledgeLink plugin.
//!
//! This module defines the centralized error type [`KnowledgeLinkError`] and a type
//! alias [`Result`] used throughout the crate. Controllers classify and absorb these
//! errors themselves; nothing is re-thrown past a sub-controller boundary.

use thiserror::Error;

/// The main error type for KnowledgeLink operations.
///
/// # Examples
///
/// ```
/// use knowledgelink::KnowledgeLinkError;
///
/// let err = KnowledgeLinkError::Http { status: 400, detail: Some("Could not scrape content from URL.".to_string()) };
/// assert_eq!(err.to_string(), "HTTP 400: Could not scrape content from URL.");
/// ```
#[derive(Debug, Error)]
pub enum KnowledgeLinkError {
    /// The backend or identity service answered with a non-success status.
    ///
    /// `detail` carries the `{"detail": "..."}` message when the body has one.
    /// Status `0` is what the host reports when the request never reached a server.
    #[error("HTTP {status}: {}", detail.as_deref().unwrap_or("request failed"))]
    Http {
        /// HTTP status code reported by the host.
        status: u16,
        /// Optional human-readable explanation from the response body.
        detail: Option<String>,
    },

    /// A response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A request exceeded its timeout and was abandoned.
    #[error("{operation} timed out")]
    TimedOut {
        /// Name of the abandoned operation.
        operation: &'static str,
    },

    /// A request was cancelled before its reply arrived.
    #[error("{operation} was cancelled")]
    Cancelled {
        /// Name of the cancelled operation.
        operation: &'static str,
    },

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl KnowledgeLinkError {
    /// Returns the server-provided detail message, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Http { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// A specialized `Result` type for KnowledgeLink operations.
pub type Result<T> = std::result::Result<T, KnowledgeLinkError>;
