#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use firewatch_api::config::ServerConfig;
use firewatch_api::router::build_app_router;
use firewatch_api::state::AppState;
use firewatch_core::actuator::Actuator;

/// Boundary used by [`multipart_body`].
pub const BOUNDARY: &str = "firewatch-test-boundary";

/// Smallest byte sequence accepted as a JPEG capture.
pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0xFF, 0xD9];

/// Router plus the temporary upload directory it writes captures to.
///
/// The directory is removed when the value is dropped.
pub struct TestApp {
    pub router: Router,
    pub uploads: TempDir,
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Build a test `ServerConfig` with safe defaults.
///
/// The risk monitor is disabled; tests drive evaluations via `/api/predict`.
pub fn test_config(uploads: &TempDir) -> ServerConfig {
    ServerConfig {
        database_url: "postgres://unused".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        camera_url: None,
        camera_timeout_secs: 1,
        poll_interval_secs: 0,
        upload_dir: uploads.path().to_path_buf(),
        max_upload_bytes: 1024 * 1024,
    }
}

/// Build the full application router without a camera.
pub fn build_test_app(pool: PgPool) -> TestApp {
    build_test_app_with_actuator(pool, None)
}

/// Build the full application router around the given actuator.
///
/// Uses the same [`build_app_router`] as `main.rs` so the middleware stack
/// matches production.
pub fn build_test_app_with_actuator(pool: PgPool, actuator: Option<Arc<dyn Actuator>>) -> TestApp {
    let uploads = TempDir::new().expect("create temp upload dir");
    let config = test_config(&uploads);
    let state = AppState::with_actuator(pool, config.clone(), actuator);
    TestApp {
        router: build_app_router(state, &config),
        uploads,
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_multipart(app: Router, uri: &str, body: Vec<u8>) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Encode a single file field as `multipart/form-data`.
pub fn multipart_body(field: &str, filename: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

/// Store a reading through the API and return its id.
pub async fn post_reading(app: Router, temperature: f64, humidity: f64) -> i64 {
    let response = post_json(
        app,
        "/api/sensor",
        serde_json::json!({
            "device_id": "sensor_device_1",
            "temperature": temperature,
            "humidity": humidity,
            "pressure": 1012.0,
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
