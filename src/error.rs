//! Error types for Lagview
//!
//! This module defines the main error type used throughout Lagview and the
//! crate-wide [`Result`] alias.

use thiserror::Error;

/// Result type alias for Lagview operations
pub type Result<T> = std::result::Result<T, LagviewError>;

/// Main error type for Lagview
#[derive(Error, Debug)]
pub enum LagviewError {
    /// The requested group is not present in the repository's snapshot.
    ///
    /// Distinct from a group that exists but has no topic offsets or
    /// members; callers must not conflate "not found" with "no lag".
    #[error("Consumer group not available: {0}")]
    GroupUnavailable(String),

    /// The snapshot source failed to describe a group.
    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
