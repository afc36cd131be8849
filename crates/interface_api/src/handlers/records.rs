//! Customer record handlers

use axum::{
    extract::{Path, State},
    Json,
};

use core_kernel::RecordId;
use domain_ledger::{CashTransaction, CustomerRecord, PayRecordRequest};

use crate::dto::records::{CreateRecordRequest, PayRecordBody};
use crate::{error::ApiError, AppState};

/// Creates a record (an obligation the customer owes)
pub async fn create_record(
    State(state): State<AppState>,
    Json(request): Json<CreateRecordRequest>,
) -> Result<Json<CustomerRecord>, ApiError> {
    let record = request.build()?;
    let stored = state.ledger.create_record(record).await?;
    Ok(Json(stored))
}

/// Applies a payment against a record
pub async fn pay_record(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(body): Json<PayRecordBody>,
) -> Result<Json<CashTransaction>, ApiError> {
    let txn = state
        .ledger
        .pay_record(PayRecordRequest {
            record_id: id,
            amount: body.amount,
            treasury_id: body.treasury_id,
            payment_method: body.payment_method,
            description: body.description,
        })
        .await?;
    Ok(Json(txn))
}
