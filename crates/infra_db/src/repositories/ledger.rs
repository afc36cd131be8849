//! Ledger transaction repository
//!
//! Write-once by design: this repository exposes insert and reads only.
//! The aggregations the balance calculator and insights assembler need are
//! pushed into the database as grouped conditional sums.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use core_kernel::{Amount, CustomerId, DomainPort, StoreError, TransactionId, TreasuryId};
use domain_ledger::{
    CashTransaction, EntryType, FlowTotals, LedgerStore, PaymentMethod, ReferenceType,
    TransactionFilter,
};

use crate::error::store_error;

/// PostgreSQL implementation of [`LedgerStore`]
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: PgPool,
}

impl LedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct TransactionRow {
    id: Uuid,
    treasury_id: Uuid,
    customer_id: Option<Uuid>,
    entry_type: String,
    amount: Decimal,
    payment_method: String,
    description: String,
    reference_type: String,
    reference_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for CashTransaction {
    type Error = StoreError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let entry_type = EntryType::parse(&row.entry_type).ok_or_else(|| {
            StoreError::corrupt(format!("unknown entry type '{}'", row.entry_type))
        })?;
        let payment_method = PaymentMethod::parse(&row.payment_method).ok_or_else(|| {
            StoreError::corrupt(format!("unknown payment method '{}'", row.payment_method))
        })?;
        let reference_type = ReferenceType::parse(&row.reference_type).ok_or_else(|| {
            StoreError::corrupt(format!("unknown reference type '{}'", row.reference_type))
        })?;
        let amount = Amount::new(row.amount)
            .map_err(|e| StoreError::corrupt(format!("invalid stored amount: {e}")))?;
        Ok(CashTransaction {
            id: TransactionId::from(row.id),
            treasury_id: TreasuryId::from(row.treasury_id),
            customer_id: row.customer_id.map(CustomerId::from),
            entry_type,
            amount,
            payment_method,
            description: row.description,
            reference_type,
            reference_id: row.reference_id,
            created_at: row.created_at,
        })
    }
}

pub(crate) const SELECT_TRANSACTION: &str =
    "SELECT id, treasury_id, customer_id, entry_type, amount, payment_method, \
     description, reference_type, reference_id, created_at \
     FROM cash_transactions";

pub(crate) const INSERT_TRANSACTION: &str =
    "INSERT INTO cash_transactions (id, treasury_id, customer_id, entry_type, amount, \
     payment_method, description, reference_type, reference_id, created_at) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)";

pub(crate) fn bind_transaction<'q>(
    query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    txn: &'q CashTransaction,
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    query
        .bind(txn.id.as_uuid())
        .bind(txn.treasury_id.as_uuid())
        .bind(txn.customer_id.map(Uuid::from))
        .bind(txn.entry_type.as_str())
        .bind(txn.amount.get())
        .bind(txn.payment_method.as_str())
        .bind(&txn.description)
        .bind(txn.reference_type.as_str())
        .bind(txn.reference_id)
        .bind(txn.created_at)
}

impl DomainPort for LedgerRepository {}

#[async_trait]
impl LedgerStore for LedgerRepository {
    async fn get(&self, id: TransactionId) -> Result<Option<CashTransaction>, StoreError> {
        let row =
            sqlx::query_as::<_, TransactionRow>(&format!("{SELECT_TRANSACTION} WHERE id = $1"))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(store_error)?;
        row.map(CashTransaction::try_from).transpose()
    }

    async fn insert(&self, txn: CashTransaction) -> Result<CashTransaction, StoreError> {
        bind_transaction(sqlx::query(INSERT_TRANSACTION), &txn)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(txn)
    }

    async fn find(
        &self,
        filter: TransactionFilter,
    ) -> Result<Vec<CashTransaction>, StoreError> {
        // Time-ordered v7 ids give insertion order within equal timestamps.
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            "{SELECT_TRANSACTION} \
             WHERE ($1::uuid IS NULL OR customer_id = $1) \
               AND ($2::uuid IS NULL OR treasury_id = $2) \
               AND ($3::text IS NULL OR entry_type = $3) \
               AND ($4::timestamptz IS NULL OR created_at >= $4) \
             ORDER BY created_at, id"
        ))
        .bind(filter.customer_id.map(Uuid::from))
        .bind(filter.treasury_id.map(Uuid::from))
        .bind(filter.entry_type.map(|e| e.as_str()))
        .bind(filter.since)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;
        rows.into_iter().map(CashTransaction::try_from).collect()
    }

    async fn find_reversal_of(
        &self,
        original: TransactionId,
    ) -> Result<Option<CashTransaction>, StoreError> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            "{SELECT_TRANSACTION} WHERE reference_type = 'ADJUSTMENT' AND reference_id = $1"
        ))
        .bind(original.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;
        row.map(CashTransaction::try_from).transpose()
    }

    async fn customer_ledger_total(
        &self,
        customer_id: CustomerId,
    ) -> Result<Decimal, StoreError> {
        let total: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(CASE WHEN entry_type = 'DEBIT' THEN amount ELSE -amount END), 0) \
             FROM cash_transactions WHERE customer_id = $1",
        )
        .bind(customer_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(total)
    }

    async fn flow_totals(
        &self,
        treasury_id: TreasuryId,
        since: Option<DateTime<Utc>>,
    ) -> Result<FlowTotals, StoreError> {
        let row = sqlx::query(
            "SELECT \
               COALESCE(SUM(CASE WHEN entry_type = 'CREDIT' THEN amount ELSE 0 END), 0) AS inflow, \
               COALESCE(SUM(CASE WHEN entry_type = 'DEBIT' THEN amount ELSE 0 END), 0) AS outflow \
             FROM cash_transactions \
             WHERE treasury_id = $1 AND ($2::timestamptz IS NULL OR created_at >= $2)",
        )
        .bind(treasury_id.as_uuid())
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(FlowTotals {
            inflow: row.try_get("inflow").map_err(store_error)?,
            outflow: row.try_get("outflow").map_err(store_error)?,
        })
    }
}
