//! Error types for aqiwatch.
//!
//! Uses `thiserror` for library-style error definitions.

use thiserror::Error;

/// Errors that can occur in aqiwatch operations.
#[derive(Error, Debug)]
pub enum AqiError {
    /// HTTP request failed (network unreachable, timeout, bad body)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Upstream returned a non-success HTTP status
    #[error("{service} error (HTTP {status}): {message}")]
    Api {
        service: &'static str,
        status: u16,
        message: String,
    },

    /// Upstream answered successfully but reported a failure in the payload
    #[error("{0}")]
    Upstream(String),

    /// Invalid response structure
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Empty city name after trimming
    #[error("Please enter a city name.")]
    EmptyCity,

    /// Invalid URL configuration
    #[error("Invalid URL: {0}")]
    Url(String),

    /// Preference store could not be read or written
    #[error("Preference store error: {0}")]
    Store(#[from] std::io::Error),
}
