//! Route definitions for sensor readings.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sensor;
use crate::state::AppState;

/// Routes mounted at `/api`.
///
/// ```text
/// POST /sensor   -> create
/// GET  /data     -> list
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sensor", post(sensor::create))
        .route("/data", get(sensor::list))
}
