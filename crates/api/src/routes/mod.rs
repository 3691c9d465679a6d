pub mod health;
pub mod images;
pub mod sensor;

use axum::routing::get;
use axum::Router;

use crate::handlers::predict;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /sensor                  store a reading (POST)
/// /data                    list readings, newest first
/// /predict                 evaluate current fire risk
///
/// /cam                     upload capture (POST), filtered listing (GET)
/// /images                  all capture metadata
/// /images/latest           newest capture as image/jpeg
/// /images/latest/meta      newest capture metadata
/// ```
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        // Sensor ingestion and listing.
        .merge(sensor::router())
        // Risk evaluation.
        .route("/predict", get(predict::predict))
        // Camera captures.
        .merge(images::router(max_upload_bytes))
}
