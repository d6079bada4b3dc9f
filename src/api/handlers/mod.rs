//! REST API handlers

pub mod health;
pub mod leads;
pub mod metrics;
pub mod vitals;

use axum::http::StatusCode;
use axum::Json;

use crate::api::dto::ApiResponse;
use crate::domain::DomainError;

/// Map a domain error onto the generic error envelope.
pub(crate) fn map_domain_error(err: DomainError) -> (StatusCode, Json<ApiResponse<()>>) {
    let status = match &err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
    };
    (status, Json(ApiResponse::error(err.to_string())))
}
