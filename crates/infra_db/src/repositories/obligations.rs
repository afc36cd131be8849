//! Obligation repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{DomainPort, ObligationId, StoreError};
use domain_obligation::{Obligation, ObligationQuery, ObligationStatus, ObligationStore};

use crate::error::store_error;

/// PostgreSQL implementation of [`ObligationStore`]
#[derive(Debug, Clone)]
pub struct ObligationRepository {
    pool: PgPool,
}

impl ObligationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ObligationRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    amount: Decimal,
    party_name: Option<String>,
    due_date: Option<DateTime<Utc>>,
    status: String,
    done_at: Option<DateTime<Utc>>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ObligationRow> for Obligation {
    type Error = StoreError;

    fn try_from(row: ObligationRow) -> Result<Self, Self::Error> {
        let status = ObligationStatus::parse(&row.status).ok_or_else(|| {
            StoreError::corrupt(format!("unknown obligation status '{}'", row.status))
        })?;
        Ok(Obligation {
            id: ObligationId::from(row.id),
            title: row.title,
            description: row.description,
            amount: row.amount,
            party_name: row.party_name,
            due_date: row.due_date,
            status,
            done_at: row.done_at,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_OBLIGATION: &str = "SELECT id, title, description, amount, party_name, \
     due_date, status, done_at, notes, created_at, updated_at \
     FROM obligations";

impl DomainPort for ObligationRepository {}

#[async_trait]
impl ObligationStore for ObligationRepository {
    async fn get(&self, id: ObligationId) -> Result<Option<Obligation>, StoreError> {
        let row = sqlx::query_as::<_, ObligationRow>(&format!("{SELECT_OBLIGATION} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;
        row.map(Obligation::try_from).transpose()
    }

    async fn insert(&self, obligation: Obligation) -> Result<Obligation, StoreError> {
        sqlx::query(
            "INSERT INTO obligations (id, title, description, amount, party_name, \
             due_date, status, done_at, notes, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(obligation.id.as_uuid())
        .bind(&obligation.title)
        .bind(&obligation.description)
        .bind(obligation.amount)
        .bind(&obligation.party_name)
        .bind(obligation.due_date)
        .bind(obligation.status.as_str())
        .bind(obligation.done_at)
        .bind(&obligation.notes)
        .bind(obligation.created_at)
        .bind(obligation.updated_at)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(obligation)
    }

    async fn update(&self, obligation: Obligation) -> Result<Obligation, StoreError> {
        let result = sqlx::query(
            "UPDATE obligations SET title = $2, description = $3, amount = $4, \
             party_name = $5, due_date = $6, status = $7, done_at = $8, notes = $9, \
             updated_at = $10 WHERE id = $1",
        )
        .bind(obligation.id.as_uuid())
        .bind(&obligation.title)
        .bind(&obligation.description)
        .bind(obligation.amount)
        .bind(&obligation.party_name)
        .bind(obligation.due_date)
        .bind(obligation.status.as_str())
        .bind(obligation.done_at)
        .bind(&obligation.notes)
        .bind(obligation.updated_at)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Obligation", obligation.id));
        }
        Ok(obligation)
    }

    async fn find(&self, query: ObligationQuery) -> Result<Vec<Obligation>, StoreError> {
        // Open first, then nearest due date (undated last), then age.
        let rows = sqlx::query_as::<_, ObligationRow>(&format!(
            "{SELECT_OBLIGATION} \
             WHERE ($1::text IS NULL OR status = $1) \
             ORDER BY (status = 'DONE'), due_date ASC NULLS LAST, created_at, id"
        ))
        .bind(query.status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;
        rows.into_iter().map(Obligation::try_from).collect()
    }

    async fn delete(&self, id: ObligationId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM obligations WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Obligation", id));
        }
        Ok(())
    }
}
