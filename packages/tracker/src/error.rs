//! Typed errors for the tracker library.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Transient
//! collaborator failures are recovered at the call site (unranked order
//! for ranking, carry-forward for refresh) and only reach these types
//! when an operation genuinely cannot proceed.

use thiserror::Error;

/// Errors that can occur during tracker operations.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Remote extraction call failed
    #[error("extraction failed: {0}")]
    Extraction(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Remote ranking call failed
    #[error("ranking failed: {0}")]
    Ranking(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Extracted record failed validation and was discarded
    #[error("invalid product from {url}: {reason}")]
    InvalidProduct { url: String, reason: String },

    /// Catalog file I/O failed
    #[error("catalog store error: {0}")]
    Store(#[from] std::io::Error),

    /// Catalog serialization failed
    #[error("catalog serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;
