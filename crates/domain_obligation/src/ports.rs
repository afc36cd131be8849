//! Obligation store port

use async_trait::async_trait;

use core_kernel::{DomainPort, ObligationId, StoreError};

use crate::obligation::{Obligation, ObligationStatus};

/// Query parameters for listing obligations
#[derive(Debug, Clone, Default)]
pub struct ObligationQuery {
    /// Filter by lifecycle state
    pub status: Option<ObligationStatus>,
}

impl ObligationQuery {
    /// Only open obligations
    pub fn open() -> Self {
        Self {
            status: Some(ObligationStatus::Open),
        }
    }
}

/// Port for obligation persistence
///
/// Listing order: open obligations first, then by due date (undated last),
/// then by creation time - the order a payables screen shows them in.
#[async_trait]
pub trait ObligationStore: DomainPort {
    /// Fetches an obligation by id
    async fn get(&self, id: ObligationId) -> Result<Option<Obligation>, StoreError>;

    /// Persists a new obligation
    async fn insert(&self, obligation: Obligation) -> Result<Obligation, StoreError>;

    /// Replaces the stored obligation
    async fn update(&self, obligation: Obligation) -> Result<Obligation, StoreError>;

    /// Lists obligations matching the query
    async fn find(&self, query: ObligationQuery) -> Result<Vec<Obligation>, StoreError>;

    /// Removes an obligation; allowed in any state
    async fn delete(&self, id: ObligationId) -> Result<(), StoreError>;
}
