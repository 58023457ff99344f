//! Error types for the Hyperbrowser client.

use thiserror::Error;

/// Result type for Hyperbrowser client operations.
pub type Result<T> = std::result::Result<T, HyperbrowserError>;

/// Hyperbrowser client errors.
#[derive(Debug, Error)]
pub enum HyperbrowserError {
    /// Configuration error (missing API key, invalid settings)
    #[error("configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// API error (non-2xx response)
    #[error("Hyperbrowser API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Extract job reached a terminal failure state
    #[error("extract job {job_id} failed: {message}")]
    JobFailed { job_id: String, message: String },

    /// Extract job did not complete within the poll timeout
    #[error("timed out waiting for extract job {job_id}")]
    Timeout { job_id: String },

    /// Parse error (unexpected response shape)
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
