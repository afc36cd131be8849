//! Insights handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};

use core_kernel::TreasuryId;
use domain_insights::FinancialSnapshot;

use crate::dto::insights::{AdviceResponse, PeriodQuery};
use crate::{error::ApiError, AppState};

/// The numeric summary handed to the advice generator
pub async fn get_snapshot(
    State(state): State<AppState>,
    Path(id): Path<TreasuryId>,
    Query(period): Query<PeriodQuery>,
) -> Result<Json<FinancialSnapshot>, ApiError> {
    let snapshot = state.insights.assemble(id, period.days).await?;
    Ok(Json(snapshot))
}

/// Narrative advice for a treasury; cached per treasury with a TTL
pub async fn get_advice(
    State(state): State<AppState>,
    Path(id): Path<TreasuryId>,
    Query(period): Query<PeriodQuery>,
) -> Result<Json<AdviceResponse>, ApiError> {
    let advice = state.advice.advise(id, period.days).await?;
    Ok(Json(AdviceResponse { advice }))
}
