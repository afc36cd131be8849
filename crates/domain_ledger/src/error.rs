//! Ledger domain errors
//!
//! Every failure carries the ids and amounts the caller needs to render a
//! user-facing message; nothing is swallowed or retried inside the domain.

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{StoreError, TransactionId};

/// Errors that can occur in the ledger domain
#[derive(Debug, Error)]
pub enum LedgerError {
    /// An entity referenced by id does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Non-positive amount, or a payment exceeding the remaining balance
    #[error("Invalid amount {amount}: {reason}")]
    InvalidAmount { amount: Decimal, reason: String },

    /// A debit would push the customer past their credit limit
    #[error("Credit limit exceeded: limit {limit}, would-be balance {projected}")]
    CreditLimitExceeded { limit: Decimal, projected: Decimal },

    /// Treasury or customer exists but is flagged inactive
    #[error("{entity} {id} is inactive")]
    InactiveEntity { entity: &'static str, id: String },

    /// A transaction may be reversed at most once
    #[error("Transaction {id} already reversed by {reversal_id}")]
    AlreadyReversed {
        id: TransactionId,
        reversal_id: TransactionId,
    },

    /// Underlying store failure; see [`StoreError::is_transient`]
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        LedgerError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid_amount(amount: Decimal, reason: impl Into<String>) -> Self {
        LedgerError::InvalidAmount {
            amount,
            reason: reason.into(),
        }
    }

    pub fn inactive(entity: &'static str, id: impl ToString) -> Self {
        LedgerError::InactiveEntity {
            entity,
            id: id.to_string(),
        }
    }
}
