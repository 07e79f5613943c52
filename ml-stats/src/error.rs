//! Error types for ml-stats
//!
//! Defines module-specific error types using thiserror for clear error
//! propagation. The engine surfaces exactly one failure kind (a storage
//! read going wrong); "no matching rows" is conveyed as an empty result,
//! never as an error.

use thiserror::Error;

/// Main error type for ml-stats
#[derive(Error, Debug)]
pub enum Error {
    /// Database connection or query errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration or startup errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience Result type using ml-stats Error
pub type Result<T> = std::result::Result<T, Error>;
