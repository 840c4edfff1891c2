//! Error types for the blog layer.

use kino_db::{MigrationError, PoolError};

/// Errors that can occur during blog operations.
#[derive(Debug, thiserror::Error)]
pub enum BlogError {
    /// A database statement failed, including constraint violations.
    #[error("blog database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// No connection could be checked out of the pool.
    #[error("failed to get database connection: {0}")]
    Pool(#[from] r2d2::Error),

    /// The connection pool could not be built.
    #[error(transparent)]
    PoolInit(#[from] PoolError),

    /// Schema migrations failed on startup.
    #[error(transparent)]
    Migration(#[from] MigrationError),

    /// A tag the batch job relies on has not been created.
    #[error("tag not found: {0}")]
    TagNotFound(String),
}
