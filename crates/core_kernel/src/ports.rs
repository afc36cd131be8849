//! Store ports
//!
//! Every domain crate talks to persistence through a port trait; adapters
//! (PostgreSQL in `infra_db`, in-memory reference stores in the domain
//! crates) implement those traits and surface failures through the single
//! `StoreError` taxonomy defined here. The caller decides what is
//! retryable via [`StoreError::is_transient`]; the domains never retry on
//! their own.

use std::fmt;
use thiserror::Error;

/// Error type for store operations
///
/// All store adapters return this error so the domain layer can reason
/// about failures uniformly, regardless of which backend produced them.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// The operation conflicts with existing data (duplicate key, etc.)
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Connection to the underlying store failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The store is temporarily unavailable
    #[error("Store unavailable: {message}")]
    Unavailable { message: String },

    /// Stored data could not be mapped to a domain value
    #[error("Corrupt record: {message}")]
    Corrupt { message: String },

    /// An internal error occurred
    #[error("Internal store error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl StoreError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        StoreError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        StoreError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a Connection error without a source
    pub fn connection(message: impl Into<String>) -> Self {
        StoreError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a Corrupt error
    pub fn corrupt(message: impl Into<String>) -> Self {
        StoreError::Corrupt {
            message: message.into(),
        }
    }

    /// Creates an Internal error without a source
    pub fn internal(message: impl Into<String>) -> Self {
        StoreError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this failure may succeed on a caller-side retry
    ///
    /// Only infrastructure failures qualify. Whether a retry is actually
    /// safe depends on the operation: reads are idempotent, writes are not.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StoreError::Connection { .. } | StoreError::Unavailable { .. }
        )
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Marker trait for all store ports
///
/// Port traits extend this marker so implementations are guaranteed to be
/// shareable across async tasks.
pub trait DomainPort: Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found() {
        let error = StoreError::not_found("Customer", "CUS-123");
        assert!(error.is_not_found());
        assert!(!error.is_transient());
        assert!(error.to_string().contains("Customer"));
        assert!(error.to_string().contains("CUS-123"));
    }

    #[test]
    fn test_transient_classification() {
        assert!(StoreError::connection("refused").is_transient());
        assert!(StoreError::Unavailable {
            message: "maintenance".into()
        }
        .is_transient());

        assert!(!StoreError::conflict("duplicate name").is_transient());
        assert!(!StoreError::corrupt("bad enum literal").is_transient());
        assert!(!StoreError::internal("boom").is_transient());
    }
}
