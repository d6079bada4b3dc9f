//! Lead capture handlers

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use super::map_domain_error;
use crate::api::dto::{ApiResponse, CreateLeadRequest, LeadDto, PaginatedResponse};
use crate::infrastructure::Storage;
use crate::shared::types::pagination::PaginationParams;

/// Leads handler state
#[derive(Clone)]
pub struct LeadsState {
    pub storage: Arc<dyn Storage>,
}

/// Capture a contact-form lead
#[utoipa::path(
    post,
    path = "/api/v1/leads",
    tag = "Leads",
    request_body = CreateLeadRequest,
    responses(
        (status = 201, description = "Lead captured", body = ApiResponse<LeadDto>),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create_lead(
    State(state): State<LeadsState>,
    Json(body): Json<CreateLeadRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LeadDto>>), (StatusCode, Json<ApiResponse<()>>)> {
    let saved = state
        .storage
        .save_lead(body.into_domain())
        .await
        .map_err(map_domain_error)?;

    info!(id = %saved.id, "Captured lead");
    metrics::counter!("leads_captured_total").increment(1);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(LeadDto::from_domain(saved))),
    ))
}

/// List captured leads with pagination (newest first)
#[utoipa::path(
    get,
    path = "/api/v1/leads",
    tag = "Leads",
    params(
        ("page" = Option<u32>, Query, description = "1-based page index, default 1"),
        ("limit" = Option<u32>, Query, description = "Page size 1–100, default 20")
    ),
    responses(
        (status = 200, description = "Paginated leads", body = PaginatedResponse<LeadDto>)
    )
)]
pub async fn list_leads(
    State(state): State<LeadsState>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Json<PaginatedResponse<LeadDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let params = PaginationParams::resolve(&raw);

    let (items, total) = state
        .storage
        .list_leads(params.offset, u64::from(params.limit))
        .await
        .map_err(map_domain_error)?;

    let data: Vec<LeadDto> = items.into_iter().map(LeadDto::from_domain).collect();
    Ok(Json(PaginatedResponse::new(
        data,
        total,
        params.page,
        params.limit,
    )))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::routing::{get, post};
    use axum::Router;
    use serde_json::Value;

    use crate::api::dto::lead::lead_schema;
    use crate::api::middleware::validate_body;
    use crate::infrastructure::InMemoryStorage;

    fn app() -> Router {
        let state = LeadsState {
            storage: Arc::new(InMemoryStorage::new()),
        };
        let schema = Arc::new(lead_schema());
        Router::new()
            .route(
                "/api/v1/leads",
                post(create_lead)
                    .route_layer(axum::middleware::from_fn_with_state(schema, validate_body)),
            )
            .route("/api/v1/leads", get(list_leads))
            .with_state(state)
    }

    async fn send(
        svc: &mut axum::routing::RouterIntoService<Body>,
        req: Request<Body>,
    ) -> (StatusCode, Value) {
        use tower::Service;
        let resp = svc.call(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    fn post_lead(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/leads")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn captures_and_lists_lead() {
        let mut svc = app().into_service();

        let (status, json) = send(
            &mut svc,
            post_lead(r#"{"name": "Ana", "email": "ana@example.com"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["name"], "Ana");

        let req = Request::builder()
            .method("GET")
            .uri("/api/v1/leads")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(&mut svc, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["pagination"]["total"], 1);
        assert_eq!(json["data"][0]["email"], "ana@example.com");
    }

    #[tokio::test]
    async fn missing_name_and_bad_email_report_both_errors() {
        let mut svc = app().into_service();
        let (status, json) = send(&mut svc, post_lead(r#"{"email": "nope"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "fail");
        let errors = json["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0]["field"], "name");
        assert_eq!(errors[1]["field"], "email");
    }
}
