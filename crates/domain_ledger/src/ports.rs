//! Ledger store ports
//!
//! Three ports cover the collections the core reads and writes. Adapters
//! must honor two contracts that the reconciliation logic depends on:
//!
//! 1. Filtered reads return ascending `created_at`, ties in insertion
//!    order, so statements are reproducible.
//! 2. [`RecordStore::commit_payment`] persists the record update and the
//!    emitted transaction as one atomic unit - either both are visible
//!    afterwards or neither is.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use core_kernel::{CustomerId, DomainPort, RecordId, StoreError, TransactionId, TreasuryId};

use crate::record::CustomerRecord;
use crate::transaction::{CashTransaction, EntryType};
use crate::treasury::Treasury;

/// Filter for transaction queries
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Only transactions tied to this customer
    pub customer_id: Option<CustomerId>,
    /// Only transactions posted against this treasury
    pub treasury_id: Option<TreasuryId>,
    /// Only transactions of this direction
    pub entry_type: Option<EntryType>,
    /// Only transactions created at or after this instant
    pub since: Option<DateTime<Utc>>,
}

impl TransactionFilter {
    /// All transactions for one customer
    pub fn for_customer(customer_id: CustomerId) -> Self {
        Self {
            customer_id: Some(customer_id),
            ..Default::default()
        }
    }

    /// True if `txn` matches every set criterion
    pub fn matches(&self, txn: &CashTransaction) -> bool {
        self.customer_id.map_or(true, |c| txn.customer_id == Some(c))
            && self.treasury_id.map_or(true, |t| txn.treasury_id == t)
            && self.entry_type.map_or(true, |e| txn.entry_type == e)
            && self.since.map_or(true, |s| txn.created_at >= s)
    }
}

/// Result of the grouped-conditional-sum aggregation over a treasury
///
/// `inflow` sums credit entries (cash in), `outflow` sums debit entries
/// (cash out). Adapters may compute this store-side or in process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlowTotals {
    pub inflow: Decimal,
    pub outflow: Decimal,
}

impl FlowTotals {
    /// Net cash movement: inflow minus outflow
    pub fn net(&self) -> Decimal {
        self.inflow - self.outflow
    }
}

/// Port for the ledger transaction collection
///
/// Deliberately write-once: there is no update or delete. Corrections go
/// through [`crate::reversal::ReversalHandler`].
#[async_trait]
pub trait LedgerStore: DomainPort {
    /// Fetches a transaction by id
    async fn get(&self, id: TransactionId) -> Result<Option<CashTransaction>, StoreError>;

    /// Persists a new transaction
    async fn insert(&self, txn: CashTransaction) -> Result<CashTransaction, StoreError>;

    /// Lists matching transactions, ascending `created_at`
    async fn find(&self, filter: TransactionFilter) -> Result<Vec<CashTransaction>, StoreError>;

    /// Finds the adjustment entry referencing `original`, if one exists
    async fn find_reversal_of(
        &self,
        original: TransactionId,
    ) -> Result<Option<CashTransaction>, StoreError>;

    /// Signed ledger total for a customer: sum of debits minus credits
    async fn customer_ledger_total(&self, customer_id: CustomerId)
        -> Result<Decimal, StoreError>;

    /// Inflow/outflow totals for a treasury, optionally window-limited
    async fn flow_totals(
        &self,
        treasury_id: TreasuryId,
        since: Option<DateTime<Utc>>,
    ) -> Result<FlowTotals, StoreError>;
}

/// Port for the customer record collection
#[async_trait]
pub trait RecordStore: DomainPort {
    /// Fetches a record by id
    async fn get(&self, id: RecordId) -> Result<Option<CustomerRecord>, StoreError>;

    /// Persists a new record
    async fn insert(&self, record: CustomerRecord) -> Result<CustomerRecord, StoreError>;

    /// All records for a customer, ascending `created_at`
    async fn find_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<CustomerRecord>, StoreError>;

    /// Atomically persists a paid-down record and its payment transaction
    ///
    /// If either write cannot be applied the other must not become
    /// visible.
    async fn commit_payment(
        &self,
        record: &CustomerRecord,
        txn: &CashTransaction,
    ) -> Result<(), StoreError>;
}

/// Port for the treasury collection
#[async_trait]
pub trait TreasuryStore: DomainPort {
    /// Fetches a treasury by id
    async fn get(&self, id: TreasuryId) -> Result<Option<Treasury>, StoreError>;

    /// Persists a new treasury; names are unique
    async fn insert(&self, treasury: Treasury) -> Result<Treasury, StoreError>;

    /// Replaces the stored treasury
    async fn update(&self, treasury: Treasury) -> Result<Treasury, StoreError>;

    /// All treasuries, ascending `created_at`
    async fn find_all(&self) -> Result<Vec<Treasury>, StoreError>;
}
