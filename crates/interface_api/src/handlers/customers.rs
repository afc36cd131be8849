//! Customer handlers
//!
//! CRUD over the customer store plus the three read models the ledger
//! service derives: balance, summary, and the full statement.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use core_kernel::CustomerId;
use domain_customer::{
    Customer, CustomerCategory, CustomerError, CustomerQuery, CustomerStore, NewCustomer,
    UpdateCustomer,
};
use domain_ledger::{CustomerBalance, CustomerSummary, Statement};

use crate::{error::ApiError, AppState};

/// Query parameters for listing customers
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<CustomerCategory>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Creates a customer
pub async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<NewCustomer>,
) -> Result<Json<Customer>, ApiError> {
    let customer = request.build()?;
    let stored = state.customers.insert(customer).await?;
    Ok(Json(stored))
}

/// Lists customers
pub async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    let customers = state
        .customers
        .find(CustomerQuery {
            category: query.category,
            is_active: query.is_active,
            search: query.search,
            limit: query.limit,
            offset: query.offset,
        })
        .await?;
    Ok(Json(customers))
}

/// Gets a customer by id
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<Json<Customer>, ApiError> {
    let customer = state
        .customers
        .get(id)
        .await?
        .ok_or(CustomerError::NotFound(id))?;
    Ok(Json(customer))
}

/// Updates a customer
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
    Json(request): Json<UpdateCustomer>,
) -> Result<Json<Customer>, ApiError> {
    let request = request.validated()?;
    let customer = state.customers.update(id, request).await?;
    Ok(Json(customer))
}

/// Deletes a customer
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<(), ApiError> {
    state.customers.delete(id).await?;
    Ok(())
}

/// Current derived balance
pub async fn get_balance(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<Json<CustomerBalance>, ApiError> {
    Ok(Json(state.ledger.calculate_balance(id).await?))
}

/// Customer with balance and transaction history
pub async fn get_summary(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<Json<CustomerSummary>, ApiError> {
    Ok(Json(state.ledger.customer_summary(id).await?))
}

/// Chronological running-balance statement
pub async fn get_statement(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<Json<Statement>, ApiError> {
    Ok(Json(state.ledger.generate_statement(id).await?))
}
