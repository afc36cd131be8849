//! Obligation domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{ObligationId, StoreError};

/// Errors that can occur in the obligation domain
#[derive(Debug, Error)]
pub enum ObligationError {
    /// Obligation does not exist
    #[error("Obligation not found: {0}")]
    NotFound(ObligationId),

    /// Completing an obligation that is already DONE
    #[error("Obligation {0} is already done")]
    AlreadyDone(ObligationId),

    /// Reopening an obligation that is already OPEN
    #[error("Obligation {0} is already open")]
    AlreadyOpen(ObligationId),

    /// Negative amount
    #[error("Obligation amount must not be negative, got {0}")]
    InvalidAmount(Decimal),

    /// Underlying store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}
