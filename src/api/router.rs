//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::extract::FromRef;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::lead::lead_schema;
use crate::api::dto::vitals::vitals_schema;
use crate::api::dto::{
    ApiResponse, CreateLeadRequest, LeadDto, PaginatedResponse, PaginationMeta,
    RecordVitalsRequest, VitalSignsDto,
};
use crate::api::handlers::health::{self, HealthResponse, HealthState};
use crate::api::handlers::metrics::{self, MetricsState};
use crate::api::handlers::{leads, vitals};
use crate::api::middleware::{http_metrics_middleware, validate_body, ValidationFailureBody};
use crate::infrastructure::Storage;
use crate::shared::validation::{Schema, ValidationError};

/// Unified state for all routes. Axum extracts the specific handler state
/// via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub storage: Arc<dyn Storage>,
    pub vitals_schema: Arc<Schema>,
    pub lead_schema: Arc<Schema>,
    pub metrics: MetricsState,
    pub health: HealthState,
}

impl ApiState {
    /// Compile the process-wide validation schemas and assemble the state.
    pub fn new(storage: Arc<dyn Storage>, prometheus: PrometheusHandle) -> Self {
        Self {
            storage,
            vitals_schema: Arc::new(vitals_schema()),
            lead_schema: Arc::new(lead_schema()),
            metrics: MetricsState { handle: prometheus },
            health: HealthState {
                started_at: Instant::now(),
            },
        }
    }
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<ApiState> for vitals::VitalsState {
    fn from_ref(s: &ApiState) -> Self {
        vitals::VitalsState {
            storage: Arc::clone(&s.storage),
        }
    }
}

impl FromRef<ApiState> for leads::LeadsState {
    fn from_ref(s: &ApiState) -> Self {
        leads::LeadsState {
            storage: Arc::clone(&s.storage),
        }
    }
}

impl FromRef<ApiState> for MetricsState {
    fn from_ref(s: &ApiState) -> Self {
        s.metrics.clone()
    }
}

impl FromRef<ApiState> for HealthState {
    fn from_ref(s: &ApiState) -> Self {
        s.health.clone()
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        vitals::record_vitals,
        vitals::list_vitals,
        leads::create_lead,
        leads::list_leads,
    ),
    components(schemas(
        HealthResponse,
        RecordVitalsRequest,
        VitalSignsDto,
        CreateLeadRequest,
        LeadDto,
        PaginationMeta,
        PaginatedResponse<VitalSignsDto>,
        PaginatedResponse<LeadDto>,
        ApiResponse<VitalSignsDto>,
        ApiResponse<LeadDto>,
        ValidationError,
        ValidationFailureBody,
    )),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Vitals", description = "Patient vital signs"),
        (name = "Leads", description = "Contact-form lead capture"),
    ),
    info(
        title = "CareSync API",
        description = "Healthcare services REST API: vital signs and lead capture"
    )
)]
struct ApiDoc;

/// Build the application router.
///
/// Validation middleware is mounted per POST route with its schema injected
/// as middleware state, so schemas stay explicit values rather than globals.
pub fn create_api_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::prometheus_metrics))
        .route(
            "/api/v1/vitals",
            post(vitals::record_vitals).route_layer(middleware::from_fn_with_state(
                Arc::clone(&state.vitals_schema),
                validate_body,
            )),
        )
        .route("/api/v1/vitals", get(vitals::list_vitals))
        .route(
            "/api/v1/leads",
            post(leads::create_lead).route_layer(middleware::from_fn_with_state(
                Arc::clone(&state.lead_schema),
                validate_body,
            )),
        )
        .route("/api/v1/leads", get(leads::list_leads))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;

    use crate::infrastructure::InMemoryStorage;

    fn test_router() -> Router {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let state = ApiState::new(Arc::new(InMemoryStorage::new()), handle);
        create_api_router(state)
    }

    async fn send(req: Request<Body>) -> (StatusCode, Value) {
        use tower::Service;
        let mut svc = test_router().into_service();
        let resp = svc.call(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn vitals_validation_wired_into_full_router() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/vitals")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"heart_rate": "abc", "oxygen_saturation": 150}"#))
            .unwrap();
        let (status, json) = send(req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "fail");
        assert_eq!(json["errors"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn empty_list_has_complete_pagination_envelope() {
        let req = Request::builder()
            .uri("/api/v1/leads")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"], serde_json::json!([]));
        let p = &json["pagination"];
        for key in ["total", "page", "limit", "totalPages", "hasNext", "hasPrev", "nextPage", "prevPage"] {
            assert!(p.get(key).is_some(), "missing pagination key {key}");
        }
    }
}
