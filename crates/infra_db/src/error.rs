//! Database error types and the mapping into the port taxonomy

use thiserror::Error;

use core_kernel::StoreError;

/// Errors raised by the database layer itself
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Pool creation or connection establishment failed
    #[error("Database connection failed: {0}")]
    ConnectionFailed(String),

    /// Schema migration failed
    #[error("Migration failed: {0}")]
    Migration(String),
}

/// Maps a SQLx error into the port-level [`StoreError`] taxonomy
///
/// Unique-constraint violations surface as `Conflict`; connectivity
/// problems as the transient classes; everything else as `Internal`.
pub fn store_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return StoreError::conflict(db.message().to_string());
        }
    }
    match err {
        err @ (sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed) => {
            StoreError::Unavailable {
                message: err.to_string(),
            }
        }
        err @ sqlx::Error::Io(_) => StoreError::Connection {
            message: err.to_string(),
            source: Some(Box::new(err)),
        },
        err => StoreError::Internal {
            message: err.to_string(),
            source: Some(Box::new(err)),
        },
    }
}
