//! Axum route handlers for the backend API.

use std::{any::Any, collections::BTreeMap};

use axum::{
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use beacon_core::{parse_payload, sample_items, Item, ProcessReport, SemVer, API_VERSION};
use serde::Serialize;
use serde_json::Value;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{client::ClientAddr, error::BackendError};

/// Name reported by the health endpoints.
pub const SERVICE_NAME: &str = "beacon-backend";

const ENDPOINTS: &[(&str, &str)] = &[
    ("/", "GET - Service index"),
    ("/health", "GET - Health check"),
    ("/api/health", "GET - Health check"),
    ("/api/data", "GET - List sample items, POST - Create data"),
    ("/process", "POST - Process form data"),
];

// ── Response types ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: &'static str,
    pub status: &'static str,
    pub version: SemVer,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ItemList {
    pub data: &'static [Item],
}

/// Confirmation returned by `POST /api/data`.
#[derive(Debug, Serialize)]
pub struct Created {
    pub message: &'static str,
    pub data: Value,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router.
pub fn create_router() -> Router {
    with_layers(
        Router::new()
            .route("/", get(index))
            .route("/health", get(health))
            .route("/api/health", get(health))
            .route("/api/data", get(list_items).post(create_item))
            .route("/process", post(process)),
    )
}

/// Wrap `router` with panic recovery, request tracing, and a wildcard CORS policy.
pub fn with_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_owned()
    } else {
        "handler panicked".to_owned()
    };
    BackendError::Internal(detail).into_response()
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /`: service index.
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Beacon Backend API",
        status: "running",
        version: API_VERSION,
        endpoints: ENDPOINTS.iter().copied().collect(),
    })
}

/// `GET /health`, `GET /api/health`: liveness check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
    })
}

/// `GET /api/data`: the static sample items.
pub async fn list_items() -> Json<ItemList> {
    Json(ItemList {
        data: sample_items(),
    })
}

/// `POST /api/data`: echo the body back inside a confirmation.
///
/// # Errors
/// Returns [`BackendError::Internal`] if the body is not valid JSON.
pub async fn create_item(body: Bytes) -> Result<impl IntoResponse, BackendError> {
    let data: Value = serde_json::from_slice(&body)
        .map_err(|e| BackendError::Internal(format!("failed to decode JSON body: {e}")))?;
    Ok((
        StatusCode::CREATED,
        Json(Created {
            message: "Data created successfully",
            data,
        }),
    ))
}

/// `POST /process`: acknowledge a form submission.
///
/// # Errors
/// Returns [`BackendError::BadRequest`] if the body is missing, unparseable,
/// or empty, and [`BackendError::Internal`] if it is not a JSON object.
pub async fn process(
    ClientAddr(client): ClientAddr,
    body: Bytes,
) -> Result<Json<ProcessReport>, BackendError> {
    let form_data = parse_payload(&body)?;
    let report = ProcessReport::new(form_data, client);
    info!(client = %report.timestamp, fields = report.data_count, "processed form data");
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request},
    };
    use serde_json::json;
    use tower::ServiceExt;

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = match app.oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        let status = resp.status();
        let bytes = match axum::body::to_bytes(resp.into_body(), 64 * 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            match serde_json::from_slice(&bytes) {
                Ok(v) => v,
                Err(e) => panic!("invalid JSON: {e}"),
            }
        };
        (status, body)
    }

    fn get_req(uri: &str) -> Request<Body> {
        match Request::builder().uri(uri).body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        }
    }

    fn post_req(uri: &str, body: &'static str) -> Request<Body> {
        match Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
        {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        }
    }

    #[tokio::test]
    async fn health_routes_report_healthy() {
        for uri in ["/health", "/api/health"] {
            let (status, body) = send(create_router(), get_req(uri)).await;
            assert_eq!(status, StatusCode::OK, "{uri} must return 200");
            assert_eq!(body["status"], "healthy");
            assert_eq!(body["service"], SERVICE_NAME);
        }
    }

    #[tokio::test]
    async fn index_lists_version_and_endpoints() {
        let (status, body) = send(create_router(), get_req("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "running");
        assert_eq!(body["version"], "1.0.0");
        assert_eq!(body["endpoints"]["/process"], "POST - Process form data");
    }

    #[tokio::test]
    async fn list_items_returns_three_items_in_order() {
        let (status, body) = send(create_router(), get_req("/api/data")).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<i64> = match body["data"].as_array() {
            Some(items) => items.iter().filter_map(|i| i["id"].as_i64()).collect(),
            None => panic!("data must be an array: {body}"),
        };
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn create_item_echoes_body_with_201() {
        let (status, body) = send(create_router(), post_req("/api/data", r#"{"x":1}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Data created successfully");
        assert_eq!(body["data"], json!({"x": 1}));
    }

    #[tokio::test]
    async fn create_item_with_invalid_json_is_internal_error() {
        let (status, body) = send(create_router(), post_req("/api/data", "{oops")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string(), "error field must be present");
    }

    #[tokio::test]
    async fn process_greets_by_name() {
        let (status, body) = send(create_router(), post_req("/process", r#"{"name":"Alice"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["received"], true);
        assert_eq!(body["message"], "Successfully processed data for Alice");
        assert_eq!(body["data_count"], 1);
    }

    #[tokio::test]
    async fn process_counts_keys_and_echoes_form_data() {
        let (status, body) = send(create_router(), post_req("/process", r#"{"a":1,"b":2}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data_count"], 2);
        assert_eq!(body["form_data"], json!({"a": 1, "b": 2}));
        assert_eq!(body["message"], "Successfully processed data for Unknown");
    }

    #[tokio::test]
    async fn process_without_body_is_bad_request() {
        let (status, body) = send(create_router(), post_req("/process", "")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No data received");
    }

    #[tokio::test]
    async fn process_uses_forwarded_header_for_timestamp() {
        let req = match Request::builder()
            .method(Method::POST)
            .uri("/process")
            .header("x-forwarded-for", "198.51.100.4")
            .body(Body::from(r#"{"name":"Bob"}"#))
        {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let (_, body) = send(create_router(), req).await;
        assert_eq!(body["timestamp"], "198.51.100.4");
    }

    #[tokio::test]
    async fn process_non_object_body_is_internal_error() {
        let (status, body) = send(create_router(), post_req("/process", "[1,2,3]")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        match body["error"].as_str() {
            Some(msg) => assert!(msg.contains("array"), "unexpected message: {msg}"),
            None => panic!("error field missing: {body}"),
        }
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (status, _) = send(create_router(), get_req("/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn wrong_method_on_known_path_is_405() {
        let (status, _) = send(create_router(), get_req("/process")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn every_response_allows_any_origin() {
        let cases: [(Method, &str, &'static str, StatusCode); 4] = [
            (Method::GET, "/health", "", StatusCode::OK),
            (Method::POST, "/process", "", StatusCode::BAD_REQUEST),
            (Method::GET, "/nope", "", StatusCode::NOT_FOUND),
            (Method::GET, "/process", "", StatusCode::METHOD_NOT_ALLOWED),
        ];
        for (method, uri, body, expected) in cases {
            let req = match Request::builder()
                .method(method.clone())
                .uri(uri)
                .header(header::ORIGIN, "http://example.com")
                .body(Body::from(body))
            {
                Ok(r) => r,
                Err(e) => panic!("failed to build request: {e}"),
            };
            let resp = match create_router().oneshot(req).await {
                Ok(r) => r,
                Err(e) => panic!("handler error: {e}"),
            };
            assert_eq!(resp.status(), expected, "{method} {uri}");
            assert_eq!(
                resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
                Some(&header::HeaderValue::from_static("*")),
                "{method} {uri} must allow any origin"
            );
        }
    }

    async fn boom() -> &'static str {
        panic!("kaboom")
    }

    #[tokio::test]
    async fn panicking_handler_becomes_internal_error() {
        let app = with_layers(Router::new().route("/boom", get(boom)));
        let (status, body) = send(app, get_req("/boom")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "kaboom");
    }
}
