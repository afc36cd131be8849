//! Database Infrastructure
//!
//! PostgreSQL adapters for every store port, built on SQLx. Queries use
//! the runtime API with bound parameters; enums are stored as TEXT and
//! mapped in this crate so the domain crates stay free of database types.
//!
//! Atomicity: [`repositories::RecordRepository::commit_payment`] wraps the
//! record update and the transaction insert in one database transaction,
//! satisfying the all-or-nothing contract of the payment allocator.

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use repositories::{
    CustomerRepository, LedgerRepository, ObligationRepository, RecordRepository,
    TreasuryRepository,
};

/// Applies the bundled schema migrations
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), DatabaseError> {
    sqlx::migrate!()
        .run(pool)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))
}
