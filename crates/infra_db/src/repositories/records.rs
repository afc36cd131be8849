//! Customer record repository
//!
//! `commit_payment` is the one multi-statement write in the system: the
//! record update and the emitted payment transaction go through a single
//! database transaction so neither is visible without the other.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{CustomerId, DomainPort, RecordId, StoreError};
use domain_ledger::{CashTransaction, CustomerRecord, RecordStatus, RecordStore};

use crate::error::store_error;
use crate::repositories::ledger::{bind_transaction, INSERT_TRANSACTION};

/// PostgreSQL implementation of [`RecordStore`]
#[derive(Debug, Clone)]
pub struct RecordRepository {
    pool: PgPool,
}

impl RecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RecordRow {
    id: Uuid,
    customer_id: Uuid,
    title: String,
    description: Option<String>,
    total_amount: Decimal,
    paid_amount: Decimal,
    due_date: Option<DateTime<Utc>>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RecordRow> for CustomerRecord {
    type Error = StoreError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let status = RecordStatus::parse(&row.status)
            .ok_or_else(|| StoreError::corrupt(format!("unknown record status '{}'", row.status)))?;
        Ok(CustomerRecord {
            id: RecordId::from(row.id),
            customer_id: CustomerId::from(row.customer_id),
            title: row.title,
            description: row.description,
            total_amount: row.total_amount,
            paid_amount: row.paid_amount,
            due_date: row.due_date,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_RECORD: &str = "SELECT id, customer_id, title, description, total_amount, \
     paid_amount, due_date, status, created_at, updated_at \
     FROM customer_records";

const UPDATE_RECORD: &str = "UPDATE customer_records \
     SET paid_amount = $2, status = $3, updated_at = $4 WHERE id = $1";

impl DomainPort for RecordRepository {}

#[async_trait]
impl RecordStore for RecordRepository {
    async fn get(&self, id: RecordId) -> Result<Option<CustomerRecord>, StoreError> {
        let row = sqlx::query_as::<_, RecordRow>(&format!("{SELECT_RECORD} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;
        row.map(CustomerRecord::try_from).transpose()
    }

    async fn insert(&self, record: CustomerRecord) -> Result<CustomerRecord, StoreError> {
        sqlx::query(
            "INSERT INTO customer_records (id, customer_id, title, description, \
             total_amount, paid_amount, due_date, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(record.id.as_uuid())
        .bind(record.customer_id.as_uuid())
        .bind(&record.title)
        .bind(&record.description)
        .bind(record.total_amount)
        .bind(record.paid_amount)
        .bind(record.due_date)
        .bind(record.status.as_str())
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(record)
    }

    async fn find_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<CustomerRecord>, StoreError> {
        let rows = sqlx::query_as::<_, RecordRow>(&format!(
            "{SELECT_RECORD} WHERE customer_id = $1 ORDER BY created_at, id"
        ))
        .bind(customer_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;
        rows.into_iter().map(CustomerRecord::try_from).collect()
    }

    async fn commit_payment(
        &self,
        record: &CustomerRecord,
        txn: &CashTransaction,
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(store_error)?;

        let result = sqlx::query(UPDATE_RECORD)
            .bind(record.id.as_uuid())
            .bind(record.paid_amount)
            .bind(record.status.as_str())
            .bind(record.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(store_error)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Record", record.id));
        }

        bind_transaction(sqlx::query(INSERT_TRANSACTION), txn)
            .execute(&mut *tx)
            .await
            .map_err(store_error)?;

        tx.commit().await.map_err(store_error)?;
        Ok(())
    }
}
