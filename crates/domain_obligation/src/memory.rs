//! In-memory obligation store

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{DomainPort, ObligationId, StoreError};

use crate::obligation::{Obligation, ObligationStatus};
use crate::ports::{ObligationQuery, ObligationStore};

/// In-memory implementation of [`ObligationStore`]
#[derive(Debug, Default)]
pub struct InMemoryObligationStore {
    obligations: RwLock<Vec<Obligation>>,
}

impl InMemoryObligationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for InMemoryObligationStore {}

#[async_trait]
impl ObligationStore for InMemoryObligationStore {
    async fn get(&self, id: ObligationId) -> Result<Option<Obligation>, StoreError> {
        let obligations = self.obligations.read().await;
        Ok(obligations.iter().find(|o| o.id == id).cloned())
    }

    async fn insert(&self, obligation: Obligation) -> Result<Obligation, StoreError> {
        let mut obligations = self.obligations.write().await;
        obligations.push(obligation.clone());
        Ok(obligation)
    }

    async fn update(&self, obligation: Obligation) -> Result<Obligation, StoreError> {
        let mut obligations = self.obligations.write().await;
        let stored = obligations
            .iter_mut()
            .find(|o| o.id == obligation.id)
            .ok_or_else(|| StoreError::not_found("Obligation", obligation.id))?;
        *stored = obligation.clone();
        Ok(obligation)
    }

    async fn find(&self, query: ObligationQuery) -> Result<Vec<Obligation>, StoreError> {
        let obligations = self.obligations.read().await;
        let mut matched: Vec<Obligation> = obligations
            .iter()
            .filter(|o| query.status.map_or(true, |s| o.status == s))
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            let state = |o: &Obligation| o.status == ObligationStatus::Done;
            state(a)
                .cmp(&state(b))
                .then_with(|| match (a.due_date, b.due_date) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                })
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(matched)
    }

    async fn delete(&self, id: ObligationId) -> Result<(), StoreError> {
        let mut obligations = self.obligations.write().await;
        let before = obligations.len();
        obligations.retain(|o| o.id != id);
        if obligations.len() == before {
            return Err(StoreError::not_found("Obligation", id));
        }
        Ok(())
    }
}
