//! Normalized result of a remote lifecycle call

use serde::Serialize;
use std::fmt;

/// Success or error result of an API-driving operation.
///
/// `status_code` is `None` when the outcome did not come from an HTTP
/// response, e.g. [`Outcome::OK`] or the folded result of a bulk call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    status_code: Option<u16>,
    message: Option<String>,
    is_error: bool,
}

impl Outcome {
    /// Canonical no-op success: no status, no message.
    pub const OK: Outcome = Outcome {
        status_code: None,
        message: None,
        is_error: false,
    };

    /// Success carrying an HTTP status and message
    pub fn success(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code: Some(status_code),
            message: Some(message.into()),
            is_error: false,
        }
    }

    /// Error carrying an HTTP status and message
    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code: Some(status_code),
            message: Some(message.into()),
            is_error: true,
        }
    }

    /// Success with a message but no HTTP status
    pub fn success_message(message: impl Into<String>) -> Self {
        Self {
            status_code: None,
            message: Some(message.into()),
            is_error: false,
        }
    }

    /// Error with a message but no HTTP status
    pub fn error_message(message: impl Into<String>) -> Self {
        Self {
            status_code: None,
            message: Some(message.into()),
            is_error: true,
        }
    }

    /// Error with neither status nor message
    pub fn unspecified_error() -> Self {
        Self {
            status_code: None,
            message: None,
            is_error: true,
        }
    }

    /// Map a response status against the status the operation expects.
    ///
    /// The message is the reason phrase in both branches.
    pub fn normalize(status_code: u16, reason: &str, expected: u16) -> Self {
        if status_code == expected {
            Self::success(status_code, reason)
        } else {
            Self::error(status_code, reason)
        }
    }

    /// Like [`Outcome::normalize`], but an error carries the raw response
    /// body instead of the reason phrase.
    pub fn normalize_with_body(status_code: u16, reason: &str, body: &str, expected: u16) -> Self {
        if status_code == expected {
            Self::success(status_code, reason)
        } else {
            Self::error(status_code, body)
        }
    }

    /// Fold many outcomes into one.
    ///
    /// Yields [`Outcome::OK`] when none is an error, otherwise
    /// [`Outcome::unspecified_error`]. Individual messages are dropped.
    pub fn all<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = Outcome>,
    {
        let success = outcomes
            .into_iter()
            .fold(true, |acc, outcome| acc & !outcome.is_error);

        if success {
            Self::OK
        } else {
            Self::unspecified_error()
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn is_success(&self) -> bool {
        !self.is_error
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.is_error { "error" } else { "ok" };
        match (self.status_code, self.message.as_deref()) {
            (Some(status), Some(message)) => write!(f, "{} ({}): {}", label, status, message),
            (Some(status), None) => write!(f, "{} ({})", label, status),
            (None, Some(message)) => write!(f, "{}: {}", label, message),
            (None, None) => write!(f, "{}", label),
        }
    }
}
