//! Authentication
//!
//! Credential material for the WordPress REST API: an HTTP Basic
//! username/password pair (application passwords) or a bearer token (JWT
//! plugins). Exactly one scheme is active per client instance, chosen at
//! construction and immutable afterwards.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::error::WpError;

/// Authentication scheme for a client instance.
#[derive(Clone)]
pub enum Credentials {
    /// HTTP Basic authentication: `Authorization: Basic base64(user:pass)`
    Basic {
        /// WordPress username
        username: String,
        /// WordPress password or application password
        password: SecretString,
    },
    /// Bearer token authentication: `Authorization: Bearer <token>`
    Bearer(SecretString),
}

impl Credentials {
    /// Basic credentials from a username/password pair.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Bearer credentials from a token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(SecretString::from(token.into()))
    }

    /// Render the `Authorization` header value for this scheme.
    ///
    /// The returned value is marked sensitive so it is redacted from logs.
    pub(crate) fn authorization_header(&self) -> Result<HeaderValue, WpError> {
        let rendered = match self {
            Self::Basic { username, password } => {
                let pair = format!("{}:{}", username, password.expose_secret());
                format!("Basic {}", STANDARD.encode(pair.as_bytes()))
            }
            Self::Bearer(token) => format!("Bearer {}", token.expose_secret()),
        };
        let mut value = HeaderValue::from_str(&rendered)
            .map_err(|_| WpError::InvalidInput("credentials contain characters not representable in a header".into()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Credentials::Basic")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
            Self::Bearer(_) => f.debug_tuple("Credentials::Bearer").field(&"[REDACTED]").finish(),
        }
    }
}
