//! Error types for timeline-archiver
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! The taxonomy mirrors the run policy: credential and configuration
//! errors are fatal before any network activity, rate limits are handled
//! by the engine's backoff edge, and everything else aborts the run.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// The main error type for timeline-archiver
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Startup errors (fatal before any network activity)
    // ========================================================================
    #[error("Credentials error: {message}")]
    Credentials { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    // ========================================================================
    // HTTP errors
    // ========================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Server-imposed rate limit; handled by sleeping until `reset`.
    #[error("Rate limited until {reset}")]
    RateLimited { reset: DateTime<Utc> },

    // ========================================================================
    // Data and I/O errors
    // ========================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Per-item persistence failure; the engine skips the item and
    /// continues.
    #[error("Sink error: {message}")]
    Sink { message: String },

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a credentials error
    pub fn credentials(message: impl Into<String>) -> Self {
        Self::Credentials {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a sink error
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink {
            message: message.into(),
        }
    }

    /// Check if this error is a rate-limit rejection (transient by policy)
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited { .. })
    }

    /// Check if this error is fatal before any network activity
    pub fn is_startup(&self) -> bool {
        matches!(self, Error::Credentials { .. } | Error::Config { .. })
    }
}

/// Result type alias for timeline-archiver
pub type Result<T> = std::result::Result<T, Error>;
