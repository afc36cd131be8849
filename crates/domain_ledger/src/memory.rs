//! In-memory ledger store
//!
//! Reference adapter implementing all three ledger ports over one set of
//! locks, which makes `commit_payment` trivially atomic. Used by the test
//! suites and by local development without a database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use core_kernel::{CustomerId, DomainPort, RecordId, StoreError, TransactionId, TreasuryId};

use crate::ports::{FlowTotals, LedgerStore, RecordStore, TransactionFilter, TreasuryStore};
use crate::record::CustomerRecord;
use crate::transaction::{CashTransaction, EntryType, ReferenceType};
use crate::treasury::Treasury;

/// In-memory implementation of the ledger, record, and treasury ports
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    transactions: RwLock<Vec<CashTransaction>>,
    records: RwLock<Vec<CustomerRecord>>,
    treasuries: RwLock<Vec<Treasury>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for InMemoryLedger {}

#[async_trait]
impl LedgerStore for InMemoryLedger {
    async fn get(&self, id: TransactionId) -> Result<Option<CashTransaction>, StoreError> {
        let transactions = self.transactions.read().await;
        Ok(transactions.iter().find(|t| t.id == id).cloned())
    }

    async fn insert(&self, txn: CashTransaction) -> Result<CashTransaction, StoreError> {
        let mut transactions = self.transactions.write().await;
        transactions.push(txn.clone());
        Ok(txn)
    }

    async fn find(
        &self,
        filter: TransactionFilter,
    ) -> Result<Vec<CashTransaction>, StoreError> {
        let transactions = self.transactions.read().await;
        let mut matched: Vec<CashTransaction> = transactions
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        // Vec order is insertion order; the stable sort keeps it for ties.
        matched.sort_by_key(|t| t.created_at);
        Ok(matched)
    }

    async fn find_reversal_of(
        &self,
        original: TransactionId,
    ) -> Result<Option<CashTransaction>, StoreError> {
        let transactions = self.transactions.read().await;
        Ok(transactions
            .iter()
            .find(|t| {
                t.reference_type == ReferenceType::Adjustment
                    && t.reference_id == Some(*original.as_uuid())
            })
            .cloned())
    }

    async fn customer_ledger_total(
        &self,
        customer_id: CustomerId,
    ) -> Result<Decimal, StoreError> {
        let transactions = self.transactions.read().await;
        Ok(transactions
            .iter()
            .filter(|t| t.customer_id == Some(customer_id))
            .map(|t| t.customer_delta())
            .sum())
    }

    async fn flow_totals(
        &self,
        treasury_id: TreasuryId,
        since: Option<DateTime<Utc>>,
    ) -> Result<FlowTotals, StoreError> {
        let transactions = self.transactions.read().await;
        let mut totals = FlowTotals::default();
        for txn in transactions
            .iter()
            .filter(|t| t.treasury_id == treasury_id)
            .filter(|t| since.map_or(true, |s| t.created_at >= s))
        {
            match txn.entry_type {
                EntryType::Credit => totals.inflow += txn.amount.get(),
                EntryType::Debit => totals.outflow += txn.amount.get(),
            }
        }
        Ok(totals)
    }
}

#[async_trait]
impl RecordStore for InMemoryLedger {
    async fn get(&self, id: RecordId) -> Result<Option<CustomerRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn insert(&self, record: CustomerRecord) -> Result<CustomerRecord, StoreError> {
        let mut records = self.records.write().await;
        records.push(record.clone());
        Ok(record)
    }

    async fn find_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<CustomerRecord>, StoreError> {
        let records = self.records.read().await;
        let mut matched: Vec<CustomerRecord> = records
            .iter()
            .filter(|r| r.customer_id == customer_id)
            .cloned()
            .collect();
        matched.sort_by_key(|r| r.created_at);
        Ok(matched)
    }

    async fn commit_payment(
        &self,
        record: &CustomerRecord,
        txn: &CashTransaction,
    ) -> Result<(), StoreError> {
        // Both write guards are held for the whole commit, so no reader
        // observes the record updated without its transaction.
        let mut records = self.records.write().await;
        let mut transactions = self.transactions.write().await;

        let stored = records
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(|| StoreError::not_found("Record", record.id))?;
        *stored = record.clone();
        transactions.push(txn.clone());
        Ok(())
    }
}

#[async_trait]
impl TreasuryStore for InMemoryLedger {
    async fn get(&self, id: TreasuryId) -> Result<Option<Treasury>, StoreError> {
        let treasuries = self.treasuries.read().await;
        Ok(treasuries.iter().find(|t| t.id == id).cloned())
    }

    async fn insert(&self, treasury: Treasury) -> Result<Treasury, StoreError> {
        let mut treasuries = self.treasuries.write().await;
        if treasuries.iter().any(|t| t.name == treasury.name) {
            return Err(StoreError::conflict(format!(
                "treasury name '{}' already exists",
                treasury.name
            )));
        }
        treasuries.push(treasury.clone());
        Ok(treasury)
    }

    async fn update(&self, treasury: Treasury) -> Result<Treasury, StoreError> {
        let mut treasuries = self.treasuries.write().await;
        let stored = treasuries
            .iter_mut()
            .find(|t| t.id == treasury.id)
            .ok_or_else(|| StoreError::not_found("Treasury", treasury.id))?;
        *stored = treasury.clone();
        Ok(treasury)
    }

    async fn find_all(&self) -> Result<Vec<Treasury>, StoreError> {
        let treasuries = self.treasuries.read().await;
        let mut all = treasuries.clone();
        all.sort_by_key(|t| t.created_at);
        Ok(all)
    }
}
