//! Insights domain errors

use thiserror::Error;

use core_kernel::{StoreError, TreasuryId};

/// Errors that can occur assembling snapshots or generating advice
#[derive(Debug, Error)]
pub enum InsightsError {
    /// Treasury does not exist
    #[error("Treasury not found: {0}")]
    TreasuryNotFound(TreasuryId),

    /// The external generator failed
    #[error("Advice generation failed: {0}")]
    Generator(String),

    /// Underlying store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}
