//! Error Handling Module
//!
//! Defines the error taxonomy for the library: transport failures, classified
//! API errors carrying the remote diagnostic detail, and configuration errors
//! raised before any network call is attempted.

use thiserror::Error;

/// Errors returned by the WordPress client.
#[derive(Error, Debug)]
pub enum WpError {
    /// The server answered with a non-2xx status.
    ///
    /// `details` holds the decoded JSON error body when the server sent one;
    /// otherwise `message` carries the raw body text.
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Human-readable error detail
        message: String,
        /// Decoded JSON error body, if the server sent one
        details: Option<serde_json::Value>,
    },

    /// Transport-level failure (connect, TLS, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Missing or inconsistent configuration, fatal at construction time.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File access failure (media upload, config file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A caller-supplied value that cannot be represented on the wire,
    /// e.g. a header value with control characters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The server answered 2xx but the body is missing something the client
    /// needs to continue, e.g. an upload response without a media id.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl WpError {
    /// Create an API error from a status code and a raw body text.
    ///
    /// The body is decoded as JSON when possible; otherwise the raw text
    /// becomes the message.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(details) => {
                // WordPress error bodies look like {"code": ..., "message": ...}.
                let message = details
                    .get("message")
                    .and_then(|m| m.as_str())
                    .unwrap_or(body)
                    .to_string();
                Self::Api {
                    status,
                    message,
                    details: Some(details),
                }
            }
            Err(_) => Self::Api {
                status,
                message: body.to_string(),
                details: None,
            },
        }
    }

    /// The HTTP status code, for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this is an authentication/authorization failure (401 or 403).
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Whether the requested resource does not exist (404).
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for WpError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}
