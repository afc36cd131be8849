//! Transaction reversal
//!
//! History is append-only: a posted transaction is never edited or
//! deleted. The only correction is a compensating transaction with the
//! opposite direction, and each transaction may be reversed at most once.

use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use core_kernel::TransactionId;

use crate::error::LedgerError;
use crate::ports::LedgerStore;
use crate::transaction::CashTransaction;

/// A request to reverse a posted transaction
#[derive(Debug, Clone, Deserialize)]
pub struct ReverseRequest {
    pub transaction_id: TransactionId,
    pub reason: String,
}

/// Creates compensating transactions
#[derive(Clone)]
pub struct ReversalHandler {
    ledger: Arc<dyn LedgerStore>,
}

impl ReversalHandler {
    pub fn new(ledger: Arc<dyn LedgerStore>) -> Self {
        Self { ledger }
    }

    /// Posts the compensating transaction and returns it
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown transaction
    /// - `AlreadyReversed` if an adjustment already references it
    pub async fn reverse(
        &self,
        request: ReverseRequest,
    ) -> Result<CashTransaction, LedgerError> {
        let original = self
            .ledger
            .get(request.transaction_id)
            .await?
            .ok_or_else(|| LedgerError::not_found("Transaction", request.transaction_id))?;

        if let Some(existing) = self.ledger.find_reversal_of(original.id).await? {
            return Err(LedgerError::AlreadyReversed {
                id: original.id,
                reversal_id: existing.id,
            });
        }

        let reversal = CashTransaction::reversal_of(&original, &request.reason);
        let stored = self.ledger.insert(reversal).await?;

        info!(
            original = %original.id,
            reversal = %stored.id,
            "transaction reversed"
        );
        Ok(stored)
    }
}
