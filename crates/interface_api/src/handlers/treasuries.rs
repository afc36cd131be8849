//! Treasury handlers

use axum::{
    extract::{Path, State},
    Json,
};

use core_kernel::TreasuryId;
use domain_ledger::TreasuryStore;

use crate::dto::treasuries::{CreateTreasuryRequest, TreasuryResponse};
use crate::{error::ApiError, AppState};

/// Creates a treasury
pub async fn create_treasury(
    State(state): State<AppState>,
    Json(request): Json<CreateTreasuryRequest>,
) -> Result<Json<TreasuryResponse>, ApiError> {
    let treasury = state.treasuries.insert(request.build()).await?;
    let current_balance = state.ledger.treasury_balance(treasury.id).await?;
    Ok(Json(TreasuryResponse {
        treasury,
        current_balance,
    }))
}

/// Lists treasuries with their derived balances
pub async fn list_treasuries(
    State(state): State<AppState>,
) -> Result<Json<Vec<TreasuryResponse>>, ApiError> {
    let treasuries = state.treasuries.find_all().await?;
    let mut responses = Vec::with_capacity(treasuries.len());
    for treasury in treasuries {
        let current_balance = state.ledger.treasury_balance(treasury.id).await?;
        responses.push(TreasuryResponse {
            treasury,
            current_balance,
        });
    }
    Ok(Json(responses))
}

/// Closes a treasury; history is kept, new transactions are refused
pub async fn close_treasury(
    State(state): State<AppState>,
    Path(id): Path<TreasuryId>,
) -> Result<Json<TreasuryResponse>, ApiError> {
    let treasury = state.ledger.close_treasury(id).await?;
    let current_balance = state.ledger.treasury_balance(treasury.id).await?;
    Ok(Json(TreasuryResponse {
        treasury,
        current_balance,
    }))
}

/// Gets a treasury with its derived balance
pub async fn get_treasury(
    State(state): State<AppState>,
    Path(id): Path<TreasuryId>,
) -> Result<Json<TreasuryResponse>, ApiError> {
    let treasury = state
        .treasuries
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Treasury not found: {id}")))?;
    let current_balance = state.ledger.treasury_balance(treasury.id).await?;
    Ok(Json(TreasuryResponse {
        treasury,
        current_balance,
    }))
}
