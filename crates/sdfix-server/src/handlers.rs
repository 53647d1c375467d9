//! HTTP request handlers for the remediation server.
//!
//! Implements the remediation and health check endpoints using axum.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use sdfix_engine::{RemediationResult, Remediator, SourceMetadata, RULES};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Rule engine shared by all requests
    pub remediator: Arc<Remediator>,
}

impl AppState {
    /// Wrap a remediator for use as router state
    pub fn new(remediator: Remediator) -> Self {
        Self {
            remediator: Arc::new(remediator),
        }
    }
}

/// Remediation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemediateRequest {
    /// Program name
    pub pgm_name: String,

    /// Include name
    pub inc_name: String,

    /// Object type
    #[serde(rename = "type")]
    pub object_type: String,

    /// Optional object name (defaults to "")
    #[serde(default = "default_optional_field")]
    pub name: Option<String>,

    /// Optional class implementation marker (defaults to "")
    #[serde(default = "default_optional_field")]
    pub class_implementation: Option<String>,

    /// Code to remediate
    pub code: String,
}

// An absent optional field becomes "", an explicit null stays null
fn default_optional_field() -> Option<String> {
    Some(String::new())
}

impl RemediateRequest {
    /// Split into engine metadata and the code payload
    pub fn into_parts(self) -> (SourceMetadata, String) {
        let metadata = SourceMetadata {
            pgm_name: self.pgm_name,
            inc_name: self.inc_name,
            object_type: self.object_type,
            name: self.name,
            class_implementation: self.class_implementation,
        };
        (metadata, self.code)
    }
}

/// Remediation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemediateResponse {
    /// Program name
    pub pgm_name: String,

    /// Include name
    pub inc_name: String,

    /// Object type
    #[serde(rename = "type")]
    pub object_type: String,

    /// Object name as received
    pub name: Option<String>,

    /// Class implementation marker as received
    pub class_implementation: Option<String>,

    /// Code exactly as received
    pub original_code: String,

    /// Code after remediation
    pub remediated_code: String,
}

impl From<RemediationResult> for RemediateResponse {
    fn from(result: RemediationResult) -> Self {
        let metadata = result.metadata;
        Self {
            pgm_name: metadata.pgm_name,
            inc_name: metadata.inc_name,
            object_type: metadata.object_type,
            name: metadata.name,
            class_implementation: metadata.class_implementation,
            original_code: result.original_code,
            remediated_code: result.remediated_code,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Number of rewrite rules loaded
    pub rules: usize,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Request body could not be read as a remediation request
    InvalidPayload(JsonRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidPayload(rejection) => (rejection.status(), rejection.body_text()),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected remediation request: {}", rejection.body_text());
        AppError::InvalidPayload(rejection)
    }
}

/// POST /remediate_abap - Remediate a block of code
async fn remediate_abap(
    State(state): State<AppState>,
    payload: Result<Json<RemediateRequest>, JsonRejection>,
) -> Result<Json<RemediateResponse>, AppError> {
    let Json(request) = payload?;
    let (metadata, code) = request.into_parts();

    let (result, outcomes) = state.remediator.remediate_with_outcomes(metadata, code);

    for outcome in outcomes.iter().filter(|o| o.substitutions > 0) {
        debug!(
            "Rule {} rewrote {} fragment(s)",
            outcome.rule, outcome.substitutions
        );
    }
    info!(
        "Remediated {}/{}: {} substitution(s)",
        result.metadata.pgm_name,
        result.metadata.inc_name,
        outcomes.iter().map(|o| o.substitutions).sum::<usize>()
    );

    Ok(Json(result.into()))
}

/// GET /health - Liveness check
async fn health_check() -> (StatusCode, Json<HealthCheckResponse>) {
    (
        StatusCode::OK,
        Json(HealthCheckResponse {
            status: "healthy".to_string(),
            rules: RULES.len(),
        }),
    )
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/remediate_abap", post(remediate_abap))
        .route("/health", get(health_check))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::NaiveDate;
    use sdfix_engine::FixedClock;
    use tower::ServiceExt; // for oneshot

    fn create_test_state() -> AppState {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        AppState::new(Remediator::new(FixedClock::new(date)))
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = create_router(create_test_state());

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let health: HealthCheckResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.rules, RULES.len());
    }

    #[tokio::test]
    async fn test_remediate() {
        let app = create_router(create_test_state());

        let request = Request::builder()
            .method("POST")
            .uri("/remediate_abap")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"pgm_name": "ZP", "inc_name": "ZP_TOP", "type": "PROG", "code": "vbuk"}"#,
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let remediated: RemediateResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(remediated.pgm_name, "ZP");
        assert_eq!(remediated.object_type, "PROG");
        assert_eq!(remediated.original_code, "vbuk");
        assert_eq!(
            remediated.remediated_code,
            "VBAK \"Added By Pwc 2024-06-01,"
        );
    }

    #[test]
    fn test_request_defaults_optional_fields() {
        let request: RemediateRequest = serde_json::from_str(
            r#"{"pgm_name": "ZP", "inc_name": "ZP_TOP", "type": "PROG", "code": ""}"#,
        )
        .unwrap();
        assert_eq!(request.name.as_deref(), Some(""));
        assert_eq!(request.class_implementation.as_deref(), Some(""));
    }

    #[test]
    fn test_request_keeps_explicit_null() {
        let request: RemediateRequest = serde_json::from_str(
            r#"{"pgm_name": "ZP", "inc_name": "ZP_TOP", "type": "PROG", "name": null, "code": ""}"#,
        )
        .unwrap();
        assert_eq!(request.name, None);
    }

    #[test]
    fn test_response_from_result() {
        let result = RemediationResult {
            metadata: SourceMetadata::new("ZP", "ZP_TOP", "PROG").with_name("ZP"),
            original_code: "vbuk".to_string(),
            remediated_code: "VBAK".to_string(),
        };

        let json = serde_json::to_value(RemediateResponse::from(result)).unwrap();
        assert_eq!(json["type"], "PROG");
        assert_eq!(json["name"], "ZP");
        assert_eq!(json["class_implementation"], "");
        assert_eq!(json["original_code"], "vbuk");
        assert_eq!(json["remediated_code"], "VBAK");
    }
}
