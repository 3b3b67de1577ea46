//! Error types for the WordPress client.

use thiserror::Error;

/// Result type for WordPress client operations.
pub type Result<T> = std::result::Result<T, WordPressError>;

/// WordPress client errors.
#[derive(Debug, Error)]
pub enum WordPressError {
    /// Transport failure (connection refused, DNS, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from a typed endpoint
    #[error("WordPress API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Caller-supplied value rejected before any request was made
    #[error("Invalid {field}: {value:?}")]
    InvalidInput { field: &'static str, value: String },
}
