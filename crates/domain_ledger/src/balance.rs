//! Balance calculation
//!
//! A customer's balance is derived fresh on every call from two streams:
//! the signed ledger total and the unpaid remainder of their records. The
//! two reads are not taken under a common lock, so the result is a
//! best-effort snapshot; a writer landing between the reads can make it
//! momentarily stale. Callers that need a hard bound combine this with the
//! per-customer lock in [`crate::credit`].

use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

use core_kernel::CustomerId;

use crate::error::LedgerError;
use crate::ports::{LedgerStore, RecordStore};

/// The derived balance of a customer
///
/// `total` is what the customer currently owes: positive means the
/// customer owes the business, negative means the business owes the
/// customer. Always `ledger + unpaid_records`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CustomerBalance {
    /// Signed sum over ledger transactions: debits minus credits
    pub ledger: Decimal,
    /// Sum of `total - paid` over OPEN and PARTIAL records
    pub unpaid_records: Decimal,
    /// `ledger + unpaid_records`
    pub total: Decimal,
}

/// Computes customer balances; read-only and safe to call concurrently
#[derive(Clone)]
pub struct BalanceCalculator {
    ledger: Arc<dyn LedgerStore>,
    records: Arc<dyn RecordStore>,
}

impl BalanceCalculator {
    pub fn new(ledger: Arc<dyn LedgerStore>, records: Arc<dyn RecordStore>) -> Self {
        Self { ledger, records }
    }

    /// Computes the current balance for `customer_id`
    ///
    /// Does not verify the customer exists; an unknown id simply has no
    /// events and yields a zero balance. Existence checks belong to the
    /// service layer.
    pub async fn calculate(
        &self,
        customer_id: CustomerId,
    ) -> Result<CustomerBalance, LedgerError> {
        let ledger = self.ledger.customer_ledger_total(customer_id).await?;

        let records = self.records.find_by_customer(customer_id).await?;
        let unpaid_records: Decimal = records
            .iter()
            .filter(|r| !r.is_settled())
            .map(|r| r.remaining())
            .sum();

        Ok(CustomerBalance {
            ledger,
            unpaid_records,
            total: ledger + unpaid_records,
        })
    }
}
