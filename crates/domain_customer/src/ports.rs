//! Customer store port

use async_trait::async_trait;

use core_kernel::{CustomerId, DomainPort, StoreError};

use crate::customer::{Customer, CustomerCategory, UpdateCustomer};

/// Query parameters for listing customers
#[derive(Debug, Clone, Default)]
pub struct CustomerQuery {
    /// Filter by category
    pub category: Option<CustomerCategory>,
    /// Filter by active flag
    pub is_active: Option<bool>,
    /// Case-insensitive substring match on name
    pub search: Option<String>,
    /// Limit results
    pub limit: Option<u32>,
    /// Offset for pagination
    pub offset: Option<u32>,
}

impl CustomerQuery {
    /// Creates a query for active customers only
    pub fn active() -> Self {
        Self {
            is_active: Some(true),
            ..Default::default()
        }
    }
}

/// Port for customer persistence
///
/// Listing order is ascending `created_at`; ties keep insertion order so
/// repeated reads are reproducible.
#[async_trait]
pub trait CustomerStore: DomainPort {
    /// Fetches a customer by id
    async fn get(&self, id: CustomerId) -> Result<Option<Customer>, StoreError>;

    /// Persists a new customer
    async fn insert(&self, customer: Customer) -> Result<Customer, StoreError>;

    /// Applies a partial update and returns the updated customer
    async fn update(
        &self,
        id: CustomerId,
        update: UpdateCustomer,
    ) -> Result<Customer, StoreError>;

    /// Lists customers matching the query
    async fn find(&self, query: CustomerQuery) -> Result<Vec<Customer>, StoreError>;

    /// Removes a customer
    async fn delete(&self, id: CustomerId) -> Result<(), StoreError>;
}
