//! Error types for the lifecycle manager
//!
//! Only conditions that make an operation meaningless end up here. A remote
//! call that completes with an unexpected status is reported as an error
//! [`Outcome`](crate::Outcome), not as an [`ActivityError`].

use thiserror::Error;

/// Result type alias for lifecycle manager operations
pub type Result<T> = std::result::Result<T, ActivityError>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Fatal failures of a lifecycle operation
#[derive(Error, Debug)]
pub enum ActivityError {
    /// HTTP request failed before a response was received
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport-level failure reported by a custom transport
    #[error("Transport error: {0}")]
    Transport(String),

    /// A listing call returned something other than the documented status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Credential exchange or request signing failed
    #[error("Authentication failed: {message}")]
    Auth {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// A numeric id in a response could not be parsed
    #[error("Invalid numeric id {value:?}: {source}")]
    InvalidId {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ActivityError {
    /// Authentication failure without an underlying cause
    pub fn auth(message: impl Into<String>) -> Self {
        ActivityError::Auth {
            message: message.into(),
            source: None,
        }
    }

    /// Authentication failure caused by another error
    pub fn auth_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ActivityError::Auth {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get the HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ActivityError::Api { status, .. } => Some(*status),
            ActivityError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for ActivityError {
    fn from(err: config::ConfigError) -> Self {
        ActivityError::Config(err.to_string())
    }
}
