//! Obligation handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use core_kernel::ObligationId;
use domain_obligation::{NewObligation, Obligation, ObligationQuery, ObligationStatus};

use crate::{error::ApiError, AppState};

/// Query parameters for listing obligations
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<ObligationStatus>,
}

/// Creates an obligation
pub async fn create_obligation(
    State(state): State<AppState>,
    Json(request): Json<NewObligation>,
) -> Result<Json<Obligation>, ApiError> {
    Ok(Json(state.obligations.create(request).await?))
}

/// Lists obligations
pub async fn list_obligations(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Obligation>>, ApiError> {
    let obligations = state
        .obligations
        .list(ObligationQuery {
            status: query.status,
        })
        .await?;
    Ok(Json(obligations))
}

/// Gets an obligation by id
pub async fn get_obligation(
    State(state): State<AppState>,
    Path(id): Path<ObligationId>,
) -> Result<Json<Obligation>, ApiError> {
    Ok(Json(state.obligations.get(id).await?))
}

/// Marks an obligation settled
pub async fn mark_done(
    State(state): State<AppState>,
    Path(id): Path<ObligationId>,
) -> Result<Json<Obligation>, ApiError> {
    Ok(Json(state.obligations.mark_done(id).await?))
}

/// Reopens a settled obligation
pub async fn reopen(
    State(state): State<AppState>,
    Path(id): Path<ObligationId>,
) -> Result<Json<Obligation>, ApiError> {
    Ok(Json(state.obligations.reopen(id).await?))
}

/// Deletes an obligation
pub async fn delete_obligation(
    State(state): State<AppState>,
    Path(id): Path<ObligationId>,
) -> Result<(), ApiError> {
    state.obligations.delete(id).await?;
    Ok(())
}
