//! Vital signs handlers

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use super::map_domain_error;
use crate::api::dto::{
    ApiResponse, PaginatedResponse, RecordVitalsRequest, VitalSignsDto,
};
use crate::infrastructure::Storage;
use crate::shared::types::pagination::PaginationParams;

/// Vitals handler state
#[derive(Clone)]
pub struct VitalsState {
    pub storage: Arc<dyn Storage>,
}

/// Record a vital-signs reading
///
/// The body is validated and coerced by the vitals schema middleware
/// before this handler runs.
#[utoipa::path(
    post,
    path = "/api/v1/vitals",
    tag = "Vitals",
    request_body = RecordVitalsRequest,
    responses(
        (status = 201, description = "Reading recorded", body = ApiResponse<VitalSignsDto>),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn record_vitals(
    State(state): State<VitalsState>,
    Json(body): Json<RecordVitalsRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VitalSignsDto>>), (StatusCode, Json<ApiResponse<()>>)> {
    let vitals = body
        .into_domain()
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ApiResponse::error(e))))?;

    let saved = state
        .storage
        .save_vitals(vitals)
        .await
        .map_err(map_domain_error)?;

    info!(id = %saved.id, heart_rate = saved.heart_rate, "Recorded vitals reading");
    metrics::counter!("vitals_recorded_total").increment(1);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(VitalSignsDto::from_domain(saved))),
    ))
}

/// List vital-signs readings with pagination
///
/// Newest readings first. Malformed `page`/`limit` values fall back to
/// defaults (page 1, 20 per page); `limit` is capped at 100.
#[utoipa::path(
    get,
    path = "/api/v1/vitals",
    tag = "Vitals",
    params(
        ("page" = Option<u32>, Query, description = "1-based page index, default 1"),
        ("limit" = Option<u32>, Query, description = "Page size 1–100, default 20")
    ),
    responses(
        (status = 200, description = "Paginated readings", body = PaginatedResponse<VitalSignsDto>)
    )
)]
pub async fn list_vitals(
    State(state): State<VitalsState>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Json<PaginatedResponse<VitalSignsDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let params = PaginationParams::resolve(&raw);

    let (items, total) = state
        .storage
        .list_vitals(params.offset, u64::from(params.limit))
        .await
        .map_err(map_domain_error)?;

    let data: Vec<VitalSignsDto> = items.into_iter().map(VitalSignsDto::from_domain).collect();
    Ok(Json(PaginatedResponse::new(
        data,
        total,
        params.page,
        params.limit,
    )))
}

// ── Tests ──────────────────────────────────────────────────────
