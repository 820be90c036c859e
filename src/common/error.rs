//! Error types for the E2E harness
//!
//! Every failure the harness can hit maps to one variant here. Messages are
//! written to be read straight off a CI log: they name the environment
//! variable, the target address, or the expected and actual values.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the E2E harness
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    #[error("{name} is not set. Set {name} to {hint}")]
    MissingEnv { name: &'static str, hint: &'static str },

    #[error("{name} has an invalid value '{value}': {reason}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        reason: String,
    },

    // === Transport Errors ===
    #[error("Connection error when reaching {url}")]
    ConnectionFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} timed out after {millis} ms")]
    Timeout {
        url: String,
        millis: u64,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // === Assertion Errors ===
    #[error("{message}\nExpected: {expected}\nActual:   {actual}")]
    Assertion {
        message: String,
        expected: String,
        actual: String,
    },

    // === Internal Errors ===
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required environment value is missing or unusable
    Configuration,
    /// The HTTP exchange could not be completed at all
    Transport,
    /// The service answered, but not with what was expected
    Assertion,
    /// Anything else
    Unexpected,
}

impl Error {
    /// Create an assertion error from already-rendered values
    pub fn assertion(
        message: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::Assertion {
            message: message.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Which part of the taxonomy this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingEnv { .. } | Error::InvalidEnv { .. } => ErrorKind::Configuration,
            Error::ConnectionFailed { .. } | Error::Timeout { .. } | Error::Request { .. } => {
                ErrorKind::Transport
            }
            Error::Assertion { .. } => ErrorKind::Assertion,
            Error::ClientBuild(_) | Error::Internal(_) => ErrorKind::Unexpected,
        }
    }

    /// Stable code for log lines
    pub fn code(&self) -> &'static str {
        match self {
            Error::MissingEnv { .. } => "MISSING_ENV",
            Error::InvalidEnv { .. } => "INVALID_ENV",
            Error::ConnectionFailed { .. } => "CONNECTION_FAILED",
            Error::Timeout { .. } => "TIMEOUT",
            Error::Request { .. } => "REQUEST_FAILED",
            Error::Assertion { .. } => "ASSERTION_FAILED",
            Error::ClientBuild(_) => "CLIENT_BUILD",
            Error::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
