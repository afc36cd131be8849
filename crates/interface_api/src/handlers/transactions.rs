//! Transaction handlers
//!
//! Posting and reversal only - posted transactions cannot be edited or
//! deleted over the API, by design.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use core_kernel::TransactionId;
use domain_ledger::{CashTransaction, NewTransaction, ReverseRequest};

use crate::dto::transactions::{ReverseBody, TransactionQuery};
use crate::{error::ApiError, AppState};

/// Posts a manual ledger entry
pub async fn create_transaction(
    State(state): State<AppState>,
    Json(request): Json<NewTransaction>,
) -> Result<Json<CashTransaction>, ApiError> {
    let txn = state.ledger.record_transaction(request).await?;
    Ok(Json(txn))
}

/// Lists transactions
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionQuery>,
) -> Result<Json<Vec<CashTransaction>>, ApiError> {
    let transactions = state.ledger.transactions(query.into()).await?;
    Ok(Json(transactions))
}

/// Reverses a posted transaction
pub async fn reverse_transaction(
    State(state): State<AppState>,
    Path(id): Path<TransactionId>,
    Json(body): Json<ReverseBody>,
) -> Result<Json<CashTransaction>, ApiError> {
    let reversal = state
        .ledger
        .reverse_transaction(ReverseRequest {
            transaction_id: id,
            reason: body.reason,
        })
        .await?;
    Ok(Json(reversal))
}
