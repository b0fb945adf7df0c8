//! Error taxonomy for the recommendation engine.
//!
//! Every input is already-loaded in-memory data, so there are no transient
//! failure modes and no retries; errors surface to the caller synchronously.
//! A degenerate all-zero query vector is deliberately NOT an error - the
//! similarity layer degrades it to similarity 0 for every item.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommendError {
    /// The requested user id has no stored profile
    #[error("User {user_id} not found")]
    UserNotFound { user_id: String },

    /// No catalog items survived preprocessing
    #[error("Catalog is empty")]
    EmptyCatalog,

    /// Request parameters are out of range
    #[error("Invalid parameters: {reason}")]
    InvalidParameters { reason: String },

    /// A filter stage failed
    #[error("Filter pipeline failed: {0}")]
    Pipeline(#[from] anyhow::Error),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RecommendError>;
