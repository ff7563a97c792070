//! # AppError
//!
//! Centralized error handling for the adboard domain core.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all ab-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid field value (empty title, negative price, bad username shape, ...).
    /// Always raised from the constructor or setter, never deferred.
    #[error("validation error: {0}")]
    Validation(String),

    /// Repository lookup, update, or delete against an absent id.
    #[error("{0} not found with ID {1}")]
    NotFound(&'static str, String),

    /// Resource already exists or the operation would break a referential rule
    /// (duplicate category name, duplicate username, sender not a participant,
    /// category still referenced by advertisements).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Persisted document could not be parsed at all.
    /// Individual bad elements inside a parseable array are skipped, not raised.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// Snapshot store failure (reading or writing the backing text files).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Infrastructure failure that no caller can act on (e.g. a snapshot
    /// that cannot be rendered to JSON).
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for adboard domain logic.
pub type Result<T> = std::result::Result<T, AppError>;
