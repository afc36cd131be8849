//! Obligation service
//!
//! Thin wrapper over the store that owns the state-machine transitions.

use std::sync::Arc;
use tracing::info;

use core_kernel::ObligationId;

use crate::error::ObligationError;
use crate::obligation::{NewObligation, Obligation};
use crate::ports::{ObligationQuery, ObligationStore};

/// Service for business payables
pub struct ObligationService {
    store: Arc<dyn ObligationStore>,
}

impl ObligationService {
    pub fn new(store: Arc<dyn ObligationStore>) -> Self {
        Self { store }
    }

    /// Creates an obligation
    pub async fn create(&self, input: NewObligation) -> Result<Obligation, ObligationError> {
        let obligation = input.build()?;
        let stored = self.store.insert(obligation).await?;
        info!(obligation = %stored.id, "obligation created");
        Ok(stored)
    }

    /// Fetches an obligation by id
    pub async fn get(&self, id: ObligationId) -> Result<Obligation, ObligationError> {
        self.store
            .get(id)
            .await?
            .ok_or(ObligationError::NotFound(id))
    }

    /// Lists obligations
    pub async fn list(&self, query: ObligationQuery) -> Result<Vec<Obligation>, ObligationError> {
        Ok(self.store.find(query).await?)
    }

    /// Transitions OPEN -> DONE, stamping `done_at`
    pub async fn mark_done(&self, id: ObligationId) -> Result<Obligation, ObligationError> {
        let mut obligation = self.get(id).await?;
        obligation.mark_done()?;
        let stored = self.store.update(obligation).await?;
        info!(obligation = %stored.id, "obligation settled");
        Ok(stored)
    }

    /// Transitions DONE -> OPEN, clearing `done_at`
    pub async fn reopen(&self, id: ObligationId) -> Result<Obligation, ObligationError> {
        let mut obligation = self.get(id).await?;
        obligation.reopen()?;
        let stored = self.store.update(obligation).await?;
        info!(obligation = %stored.id, "obligation reopened");
        Ok(stored)
    }

    /// Removes an obligation; allowed in any state
    pub async fn delete(&self, id: ObligationId) -> Result<(), ObligationError> {
        self.store.delete(id).await?;
        info!(obligation = %id, "obligation deleted");
        Ok(())
    }
}
