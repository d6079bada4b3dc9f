//! Request-validation and metrics middleware
//!
//! `validate_body` runs a compiled [`Schema`] against the JSON request body
//! before the handler sees it. On success the body is replaced with the
//! coerced value; on validation failure the request short-circuits with the
//! fixed 400 envelope `{"status": "fail", "message": "Validation failed",
//! "errors": [...]}` the frontend depends on. Structurally broken input
//! (unparseable JSON, non-object bodies) goes through the generic error
//! envelope instead of being reported as a validation failure.

use std::sync::Arc;
use std::time::Instant;

use axum::body::{to_bytes, Body};
use axum::extract::{MatchedPath, Request, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::api::dto::ApiResponse;
use crate::shared::validation::{Schema, SchemaError, ValidationError};

/// Upper bound on buffered request bodies (these endpoints carry small JSON).
const MAX_BODY_BYTES: usize = 256 * 1024;

/// The 400 envelope for failed validation. Field names and the literal
/// `status`/`message` values are a client contract.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationFailureBody {
    /// Always `"fail"`
    pub status: String,
    /// Always `"Validation failed"`
    pub message: String,
    /// One entry per violated constraint, in schema declaration order
    pub errors: Vec<ValidationError>,
}

impl ValidationFailureBody {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self {
            status: "fail".to_string(),
            message: "Validation failed".to_string(),
            errors,
        }
    }
}

impl IntoResponse for ValidationFailureBody {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

fn generic_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<()>::error(message))).into_response()
}

/// Schema-validation middleware, mounted per route with
/// `middleware::from_fn_with_state(schema, validate_body)`.
pub async fn validate_body(
    State(schema): State<Arc<Schema>>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();

    let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => return generic_error(StatusCode::BAD_REQUEST, format!("Unreadable body: {e}")),
    };

    let value: Value = match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(e) => return generic_error(StatusCode::BAD_REQUEST, format!("Invalid JSON: {e}")),
    };

    match schema.check(&value) {
        Ok(coerced) => {
            let bytes = match serde_json::to_vec(&Value::Object(coerced)) {
                Ok(bytes) => bytes,
                Err(e) => {
                    return generic_error(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Serialization error: {e}"),
                    )
                }
            };
            // The coerced body may differ in length from the original
            parts
                .headers
                .insert(header::CONTENT_LENGTH, HeaderValue::from(bytes.len()));
            let request = Request::from_parts(parts, Body::from(bytes));
            next.run(request).await
        }
        Err(SchemaError::NotAnObject) => generic_error(
            StatusCode::BAD_REQUEST,
            "Request body must be a JSON object",
        ),
        Err(SchemaError::Invalid(errors)) => ValidationFailureBody::new(errors).into_response(),
    }
}

/// Middleware that records HTTP request metrics:
///
/// - **`http_requests_total`** — counter with labels `method`, `path`, `status`
/// - **`http_request_duration_seconds`** — histogram with labels `method`, `path`
pub async fn http_metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();

    metrics::counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status)
        .increment(1);
    metrics::histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(duration);

    response
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;

    use crate::api::dto::vitals::vitals_schema;

    #[derive(Debug, Deserialize)]
    struct VitalsBody {
        heart_rate: i32,
        oxygen_saturation: Option<f64>,
    }

    async fn echo(Json(body): Json<VitalsBody>) -> String {
        format!("{}:{:?}", body.heart_rate, body.oxygen_saturation)
    }

    fn app() -> Router {
        let schema = Arc::new(vitals_schema());
        Router::new().route(
            "/vitals",
            post(echo).route_layer(axum::middleware::from_fn_with_state(schema, validate_body)),
        )
    }

    async fn send(body: Body) -> axum::http::Response<Body> {
        use tower::Service;
        let req = HttpRequest::builder()
            .method("POST")
            .uri("/vitals")
            .header("content-type", "application/json")
            .body(body)
            .unwrap();
        let mut svc = app().into_service();
        svc.call(req).await.unwrap()
    }

    async fn body_json(resp: axum::http::Response<Body>) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn valid_body_reaches_handler() {
        let resp = send(Body::from(r#"{"heart_rate": 75}"#)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"75:None");
    }

    #[tokio::test]
    async fn handler_sees_coerced_values() {
        let resp = send(Body::from(
            r#"{"heart_rate": "80", "oxygen_saturation": "97.5"}"#,
        ))
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"80:Some(97.5)");
    }

    #[tokio::test]
    async fn violation_returns_fixed_envelope() {
        let resp = send(Body::from(r#"{"heart_rate": 20}"#)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["status"], "fail");
        assert_eq!(json["message"], "Validation failed");
        assert_eq!(json["errors"][0]["field"], "heart_rate");
        assert_eq!(json["errors"][0]["message"], "heart_rate must be at least 30");
    }

    #[tokio::test]
    async fn all_violations_reported_in_schema_order() {
        let resp = send(Body::from(
            r#"{"heart_rate": "abc", "oxygen_saturation": 150}"#,
        ))
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        let errors = json["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0]["field"], "heart_rate");
        assert_eq!(errors[1]["field"], "oxygen_saturation");
    }

    #[tokio::test]
    async fn unparseable_json_uses_generic_envelope() {
        let resp = send(Body::from("not json")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["success"], false);
        assert!(json.get("status").is_none());
    }

    #[tokio::test]
    async fn non_object_body_uses_generic_envelope() {
        let resp = send(Body::from("[1, 2, 3]")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Request body must be a JSON object");
    }
}
