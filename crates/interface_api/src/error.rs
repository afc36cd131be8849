//! API error handling
//!
//! Maps the domain error taxonomies onto HTTP statuses: missing entities
//! are 404, caller-correctable amounts and validation failures are 422,
//! business-rule refusals (credit limit, inactive entities, repeat
//! transitions) are 409, and transient store failures are 503 so clients
//! know a retry may help.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use core_kernel::StoreError;
use domain_customer::CustomerError;
use domain_insights::InsightsError;
use domain_ledger::LedgerError;
use domain_obligation::ObligationError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    UnprocessableEntity(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::UnprocessableEntity(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg.clone())
            }
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Unavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", msg.clone())
            }
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

fn from_store(err: StoreError) -> ApiError {
    if err.is_not_found() {
        ApiError::NotFound(err.to_string())
    } else if err.is_transient() {
        ApiError::Unavailable(err.to_string())
    } else if matches!(err, StoreError::Conflict { .. }) {
        ApiError::Conflict(err.to_string())
    } else {
        ApiError::Internal(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        from_store(err)
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            LedgerError::InvalidAmount { .. } => ApiError::UnprocessableEntity(err.to_string()),
            LedgerError::CreditLimitExceeded { .. }
            | LedgerError::InactiveEntity { .. }
            | LedgerError::AlreadyReversed { .. } => ApiError::Conflict(err.to_string()),
            LedgerError::Store(store) => from_store(store),
        }
    }
}

impl From<CustomerError> for ApiError {
    fn from(err: CustomerError) -> Self {
        match err {
            CustomerError::NotFound(_) => ApiError::NotFound(err.to_string()),
            CustomerError::Validation(_) => ApiError::UnprocessableEntity(err.to_string()),
            CustomerError::Store(store) => from_store(store),
        }
    }
}

impl From<ObligationError> for ApiError {
    fn from(err: ObligationError) -> Self {
        match err {
            ObligationError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ObligationError::AlreadyDone(_) | ObligationError::AlreadyOpen(_) => {
                ApiError::Conflict(err.to_string())
            }
            ObligationError::InvalidAmount(_) => ApiError::UnprocessableEntity(err.to_string()),
            ObligationError::Store(store) => from_store(store),
        }
    }
}

impl From<InsightsError> for ApiError {
    fn from(err: InsightsError) -> Self {
        match err {
            InsightsError::TreasuryNotFound(_) => ApiError::NotFound(err.to_string()),
            InsightsError::Generator(_) => ApiError::Internal(err.to_string()),
            InsightsError::Store(store) => from_store(store),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_credit_limit_maps_to_conflict() {
        let err: ApiError = LedgerError::CreditLimitExceeded {
            limit: dec!(1000),
            projected: dec!(1050),
        }
        .into();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn test_transient_store_maps_to_unavailable() {
        let err: ApiError = StoreError::connection("refused").into();
        assert!(matches!(err, ApiError::Unavailable(_)));
    }

    #[test]
    fn test_invalid_amount_maps_to_unprocessable() {
        let err: ApiError =
            LedgerError::invalid_amount(dec!(-5), "must be positive").into();
        assert!(matches!(err, ApiError::UnprocessableEntity(_)));
    }
}
