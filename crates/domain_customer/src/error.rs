//! Customer domain errors

use core_kernel::{CustomerId, StoreError};
use thiserror::Error;

/// Errors that can occur in the customer domain
#[derive(Debug, Error)]
pub enum CustomerError {
    /// Customer does not exist
    #[error("Customer not found: {0}")]
    NotFound(CustomerId),

    /// Input failed validation
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Underlying store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}
