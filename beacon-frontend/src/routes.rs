//! Axum route handlers for the frontend API.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use beacon_core::{SemVer, API_VERSION};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

use crate::upstream::BackendApi;

// ── Shared state ─────────────────────────────────────────────────────────────

type Backend = Arc<dyn BackendApi>;

/// Name reported by the health endpoint and in proxied payloads.
pub const SERVICE_NAME: &str = "beacon-frontend";

// ── Response types ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: &'static str,
    pub status: &'static str,
    pub version: SemVer,
    pub backend_url: String,
}

#[derive(Debug, Serialize)]
pub struct ProxiedData {
    pub source: &'static str,
    pub backend_data: Value,
}

#[derive(Debug, Serialize)]
pub struct BackendHealth {
    pub frontend: &'static str,
    pub backend: Value,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the frontend router over the given backend client.
pub fn create_router(backend: Backend) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/data", get(proxy_data))
        .route("/api/backend-health", get(backend_health))
        .with_state(backend)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health`: liveness check stamped with the current UTC time.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// `GET /`: service index including the configured backend URL.
pub async fn index(State(backend): State<Backend>) -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Beacon Frontend API",
        status: "running",
        version: API_VERSION,
        backend_url: backend.base_url().to_owned(),
    })
}

/// `GET /api/data`: the backend's item list, tagged with this service's name.
///
/// Responds 500 when the backend cannot be reached or answers badly.
pub async fn proxy_data(State(backend): State<Backend>) -> Response {
    match backend.get_json("/api/data").await {
        Ok(backend_data) => Json(ProxiedData {
            source: SERVICE_NAME,
            backend_data,
        })
        .into_response(),
        Err(e) => {
            warn!(error = %e, "backend data fetch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to fetch data from backend",
                    "message": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

/// `GET /api/backend-health`: combined health of both services.
///
/// Responds 503 when the backend health check fails.
pub async fn backend_health(State(backend): State<Backend>) -> Response {
    match backend.get_json("/api/health").await {
        Ok(status) => Json(BackendHealth {
            frontend: "healthy",
            backend: status,
        })
        .into_response(),
        Err(e) => {
            warn!(error = %e, "backend health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "frontend": "healthy",
                    "backend": "unreachable",
                    "error": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}
