//! Common error types for pairrank
//!
//! All variants are caller/input errors except `ConflictingRelation`, which
//! signals a broken partial-order invariant and must never be swallowed.

use thiserror::Error;

/// Common result type for pairrank operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the pairrank crates
#[derive(Error, Debug)]
pub enum Error {
    /// Referenced item set or ranking does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Private-token mismatch on a comparison submission
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Submitted pair is not the currently offered question, or the winner
    /// or indices are invalid for it
    #[error("Stale or invalid pair: {0}")]
    StaleOrInvalidPair(String),

    /// Comparison submitted against a finished ranking
    #[error("Ranking is already finished")]
    AlreadyFinished,

    /// The reverse of the requested relation is already recorded; the write
    /// is refused to keep the partial order acyclic
    #[error("Conflicting relation: {less} < {more} contradicts the recorded order")]
    ConflictingRelation { less: usize, more: usize },

    /// Token generation could not find an unused token within the retry cap
    #[error("Token space exhausted after {0} attempts")]
    TokenSpaceExhausted(usize),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error (wraps serde_json::Error)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
