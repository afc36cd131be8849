//! Customer repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{CustomerId, DomainPort, StoreError};
use domain_customer::{Customer, CustomerCategory, CustomerQuery, CustomerStore, UpdateCustomer};

use crate::error::store_error;

/// PostgreSQL implementation of [`CustomerStore`]
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    name: String,
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
    category: String,
    credit_limit: Decimal,
    opening_balance: Decimal,
    is_active: bool,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = StoreError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let category = CustomerCategory::parse(&row.category).ok_or_else(|| {
            StoreError::corrupt(format!("unknown customer category '{}'", row.category))
        })?;
        Ok(Customer {
            id: CustomerId::from(row.id),
            name: row.name,
            phone: row.phone,
            email: row.email,
            address: row.address,
            category,
            credit_limit: row.credit_limit,
            opening_balance: row.opening_balance,
            is_active: row.is_active,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_CUSTOMER: &str = "SELECT id, name, phone, email, address, category, \
     credit_limit, opening_balance, is_active, notes, created_at, updated_at \
     FROM customers";

impl DomainPort for CustomerRepository {}

#[async_trait]
impl CustomerStore for CustomerRepository {
    async fn get(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!("{SELECT_CUSTOMER} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;
        row.map(Customer::try_from).transpose()
    }

    async fn insert(&self, customer: Customer) -> Result<Customer, StoreError> {
        sqlx::query(
            "INSERT INTO customers (id, name, phone, email, address, category, \
             credit_limit, opening_balance, is_active, notes, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(customer.id.as_uuid())
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(&customer.email)
        .bind(&customer.address)
        .bind(customer.category.as_str())
        .bind(customer.credit_limit)
        .bind(customer.opening_balance)
        .bind(customer.is_active)
        .bind(&customer.notes)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(customer)
    }

    async fn update(
        &self,
        id: CustomerId,
        update: UpdateCustomer,
    ) -> Result<Customer, StoreError> {
        // Read-modify-write keeps the partial-update semantics in one
        // place (Customer::apply_update) instead of dynamic SQL.
        let mut customer = self
            .get(id)
            .await?
            .ok_or_else(|| StoreError::not_found("Customer", id))?;
        customer.apply_update(update);

        sqlx::query(
            "UPDATE customers SET name = $2, phone = $3, email = $4, address = $5, \
             category = $6, credit_limit = $7, is_active = $8, notes = $9, updated_at = $10 \
             WHERE id = $1",
        )
        .bind(customer.id.as_uuid())
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(&customer.email)
        .bind(&customer.address)
        .bind(customer.category.as_str())
        .bind(customer.credit_limit)
        .bind(customer.is_active)
        .bind(&customer.notes)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(customer)
    }

    async fn find(&self, query: CustomerQuery) -> Result<Vec<Customer>, StoreError> {
        let limit = query.limit.map(i64::from).unwrap_or(i64::MAX);
        let offset = query.offset.map(i64::from).unwrap_or(0);
        let rows = sqlx::query_as::<_, CustomerRow>(&format!(
            "{SELECT_CUSTOMER} \
             WHERE ($1::text IS NULL OR category = $1) \
               AND ($2::boolean IS NULL OR is_active = $2) \
               AND ($3::text IS NULL OR name ILIKE '%' || $3 || '%') \
             ORDER BY created_at, id \
             LIMIT $4 OFFSET $5"
        ))
        .bind(query.category.map(|c| c.as_str()))
        .bind(query.is_active)
        .bind(query.search)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;
        rows.into_iter().map(Customer::try_from).collect()
    }

    async fn delete(&self, id: CustomerId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Customer", id));
        }
        Ok(())
    }
}
