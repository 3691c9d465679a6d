//! Route definitions for camera captures.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::images;
use crate::state::AppState;

/// Routes mounted at `/api`.
///
/// The upload route gets its own body limit; captures are larger than the
/// framework default.
///
/// ```text
/// POST /cam                  -> upload
/// GET  /cam                  -> list
/// GET  /images               -> list_all
/// GET  /images/latest        -> latest
/// GET  /images/latest/meta   -> latest_meta
/// ```
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/cam",
            get(images::list)
                .post(images::upload)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/images", get(images::list_all))
        .route("/images/latest", get(images::latest))
        .route("/images/latest/meta", get(images::latest_meta))
}
