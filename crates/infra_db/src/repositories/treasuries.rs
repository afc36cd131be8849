//! Treasury repository
//!
//! Note the absence of any stored running balance: the schema has only
//! `initial_balance`, and callers derive the current balance through the
//! ledger aggregation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{Currency, DomainPort, StoreError, TreasuryId};
use domain_ledger::{Treasury, TreasuryStore, TreasuryType};

use crate::error::store_error;

/// PostgreSQL implementation of [`TreasuryStore`]
#[derive(Debug, Clone)]
pub struct TreasuryRepository {
    pool: PgPool,
}

impl TreasuryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TreasuryRow {
    id: Uuid,
    name: String,
    treasury_type: String,
    currency: String,
    initial_balance: Decimal,
    min_balance: Decimal,
    is_default: bool,
    is_active: bool,
    closed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TreasuryRow> for Treasury {
    type Error = StoreError;

    fn try_from(row: TreasuryRow) -> Result<Self, Self::Error> {
        let treasury_type = TreasuryType::parse(&row.treasury_type).ok_or_else(|| {
            StoreError::corrupt(format!("unknown treasury type '{}'", row.treasury_type))
        })?;
        let currency = Currency::from_code(&row.currency)
            .ok_or_else(|| StoreError::corrupt(format!("unknown currency '{}'", row.currency)))?;
        Ok(Treasury {
            id: TreasuryId::from(row.id),
            name: row.name,
            treasury_type,
            currency,
            initial_balance: row.initial_balance,
            min_balance: row.min_balance,
            is_default: row.is_default,
            is_active: row.is_active,
            closed_at: row.closed_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_TREASURY: &str = "SELECT id, name, treasury_type, currency, initial_balance, \
     min_balance, is_default, is_active, closed_at, created_at, updated_at \
     FROM treasuries";

impl DomainPort for TreasuryRepository {}

#[async_trait]
impl TreasuryStore for TreasuryRepository {
    async fn get(&self, id: TreasuryId) -> Result<Option<Treasury>, StoreError> {
        let row = sqlx::query_as::<_, TreasuryRow>(&format!("{SELECT_TREASURY} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;
        row.map(Treasury::try_from).transpose()
    }

    async fn insert(&self, treasury: Treasury) -> Result<Treasury, StoreError> {
        sqlx::query(
            "INSERT INTO treasuries (id, name, treasury_type, currency, initial_balance, \
             min_balance, is_default, is_active, closed_at, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(treasury.id.as_uuid())
        .bind(&treasury.name)
        .bind(treasury.treasury_type.as_str())
        .bind(treasury.currency.code())
        .bind(treasury.initial_balance)
        .bind(treasury.min_balance)
        .bind(treasury.is_default)
        .bind(treasury.is_active)
        .bind(treasury.closed_at)
        .bind(treasury.created_at)
        .bind(treasury.updated_at)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(treasury)
    }

    async fn update(&self, treasury: Treasury) -> Result<Treasury, StoreError> {
        let result = sqlx::query(
            "UPDATE treasuries SET name = $2, treasury_type = $3, currency = $4, \
             initial_balance = $5, min_balance = $6, is_default = $7, is_active = $8, \
             closed_at = $9, updated_at = $10 WHERE id = $1",
        )
        .bind(treasury.id.as_uuid())
        .bind(&treasury.name)
        .bind(treasury.treasury_type.as_str())
        .bind(treasury.currency.code())
        .bind(treasury.initial_balance)
        .bind(treasury.min_balance)
        .bind(treasury.is_default)
        .bind(treasury.is_active)
        .bind(treasury.closed_at)
        .bind(treasury.updated_at)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Treasury", treasury.id));
        }
        Ok(treasury)
    }

    async fn find_all(&self) -> Result<Vec<Treasury>, StoreError> {
        let rows =
            sqlx::query_as::<_, TreasuryRow>(&format!("{SELECT_TREASURY} ORDER BY created_at, id"))
                .fetch_all(&self.pool)
                .await
                .map_err(store_error)?;
        rows.into_iter().map(Treasury::try_from).collect()
    }
}
