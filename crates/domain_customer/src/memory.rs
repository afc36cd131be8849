//! In-memory customer store
//!
//! Reference adapter used by tests and local development. Entries are kept
//! in insertion order; `find` sorts by `created_at` with a stable sort so
//! equal timestamps preserve that order.

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{CustomerId, DomainPort, StoreError};

use crate::customer::{Customer, UpdateCustomer};
use crate::ports::{CustomerQuery, CustomerStore};

/// In-memory implementation of [`CustomerStore`]
#[derive(Debug, Default)]
pub struct InMemoryCustomerStore {
    customers: RwLock<Vec<Customer>>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for InMemoryCustomerStore {}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn get(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        let customers = self.customers.read().await;
        Ok(customers.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, customer: Customer) -> Result<Customer, StoreError> {
        let mut customers = self.customers.write().await;
        if customers.iter().any(|c| c.id == customer.id) {
            return Err(StoreError::conflict(format!(
                "customer {} already exists",
                customer.id
            )));
        }
        customers.push(customer.clone());
        Ok(customer)
    }

    async fn update(
        &self,
        id: CustomerId,
        update: UpdateCustomer,
    ) -> Result<Customer, StoreError> {
        let mut customers = self.customers.write().await;
        let customer = customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("Customer", id))?;
        customer.apply_update(update);
        Ok(customer.clone())
    }

    async fn find(&self, query: CustomerQuery) -> Result<Vec<Customer>, StoreError> {
        let customers = self.customers.read().await;
        let mut matched: Vec<Customer> = customers
            .iter()
            .filter(|c| query.category.map_or(true, |cat| c.category == cat))
            .filter(|c| query.is_active.map_or(true, |active| c.is_active == active))
            .filter(|c| {
                query
                    .search
                    .as_deref()
                    .map_or(true, |s| c.name.to_lowercase().contains(&s.to_lowercase()))
            })
            .cloned()
            .collect();
        matched.sort_by_key(|c| c.created_at);

        let offset = query.offset.unwrap_or(0) as usize;
        let matched: Vec<Customer> = matched.into_iter().skip(offset).collect();
        Ok(match query.limit {
            Some(limit) => matched.into_iter().take(limit as usize).collect(),
            None => matched,
        })
    }

    async fn delete(&self, id: CustomerId) -> Result<(), StoreError> {
        let mut customers = self.customers.write().await;
        let before = customers.len();
        customers.retain(|c| c.id != id);
        if customers.len() == before {
            return Err(StoreError::not_found("Customer", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::CustomerCategory;

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = InMemoryCustomerStore::new();
        let customer = Customer::new("Test", CustomerCategory::Regular);
        let id = customer.id;

        store.insert(customer).await.unwrap();
        assert!(store.get(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_insert_conflicts() {
        let store = InMemoryCustomerStore::new();
        let customer = Customer::new("Test", CustomerCategory::Regular);

        store.insert(customer.clone()).await.unwrap();
        assert!(store.insert(customer).await.is_err());
    }

    #[tokio::test]
    async fn test_find_filters_by_active() {
        let store = InMemoryCustomerStore::new();
        let mut inactive = Customer::new("Gone", CustomerCategory::Regular);
        inactive.is_active = false;
        store.insert(inactive).await.unwrap();
        store
            .insert(Customer::new("Here", CustomerCategory::Regular))
            .await
            .unwrap();

        let active = store.find(CustomerQuery::active()).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Here");
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let store = InMemoryCustomerStore::new();
        let err = store.delete(CustomerId::new()).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
