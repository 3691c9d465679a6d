//! Handlers for camera capture upload and retrieval.
//!
//! Captures are written to `{upload_dir}/{device_id}/` and their bytes are
//! also kept in `image_data.image_binary` so the latest capture can be served
//! without touching the filesystem.

use axum::extract::{Multipart, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use firewatch_core::capture::{capture_filename, validate_capture};
use firewatch_core::error::CoreError;
use firewatch_core::paging::{clamp_limit, CAPTURES_DEFAULT_LIMIT, CAPTURES_MAX_LIMIT};
use firewatch_core::reading::{validate_device_id, DEFAULT_DEVICE_ID};
use firewatch_core::types::DbId;
use firewatch_db::models::image_data::{CreateImageData, ImageData, ImageFilter};
use firewatch_db::repositories::{ImageDataRepo, SensorDataRepo};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the JPEG bytes.
pub const IMAGE_FIELD: &str = "image";

/// Response header flagging whether the capture was classified as a hazard.
pub const FIRE_HAZARD_HEADER: &str = "x-fire-hazard";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for the upload endpoint.
#[derive(Debug, Deserialize)]
pub struct UploadParams {
    pub device_id: Option<String>,
    pub sensor_data_id: Option<DbId>,
}

/// Query parameters for the filtered capture listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub device_id: Option<String>,
    pub sensor_data_id: Option<DbId>,
    pub limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/cam
///
/// Store a JPEG capture sent as the `image` field of a multipart body.
pub async fn upload(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<ImageData>>)> {
    let device_id = params
        .device_id
        .unwrap_or_else(|| DEFAULT_DEVICE_ID.to_string());
    validate_device_id(&device_id)?;

    let mut image: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some(IMAGE_FIELD) {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            image = Some(data.to_vec());
        }
    }
    let image = image.ok_or_else(|| AppError::BadRequest("No image data provided".to_string()))?;
    validate_capture(&image)?;

    if let Some(id) = params.sensor_data_id {
        if SensorDataRepo::find_by_id(&state.pool, id).await?.is_none() {
            return Err(CoreError::NotFound {
                entity: "SensorData",
                id,
            }
            .into());
        }
    }

    let filename = capture_filename(&device_id, Utc::now(), &Uuid::new_v4().simple().to_string());
    let device_dir = state.config.upload_dir.join(&device_id);
    tokio::fs::create_dir_all(&device_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;
    let filepath = device_dir.join(&filename);
    tokio::fs::write(&filepath, &image)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to write capture: {e}")))?;

    let input = CreateImageData {
        device_id,
        filename,
        filepath: filepath.to_string_lossy().into_owned(),
        image_binary: image,
        sensor_data_id: params.sensor_data_id,
    };

    let row = match ImageDataRepo::insert(&state.pool, &input).await {
        Ok(row) => row,
        Err(e) => {
            // Don't leave an orphaned file behind for a row that was never stored.
            if let Err(rm_err) = tokio::fs::remove_file(&filepath).await {
                tracing::warn!(path = %filepath.display(), error = %rm_err, "Failed to remove orphaned capture");
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        id = row.id,
        device_id = %row.device_id,
        bytes = input.image_binary.len(),
        "Capture stored"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// GET /api/cam
///
/// List capture metadata, optionally filtered by device or reading.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<ImageData>>>> {
    let limit = clamp_limit(params.limit, CAPTURES_DEFAULT_LIMIT, CAPTURES_MAX_LIMIT);
    let filter = ImageFilter {
        device_id: params.device_id,
        sensor_data_id: params.sensor_data_id,
    };
    let rows = ImageDataRepo::list(&state.pool, &filter, limit).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/images
///
/// Metadata for every capture, newest first.
pub async fn list_all(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<ImageData>>>> {
    let rows = ImageDataRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/images/latest
///
/// The newest capture as `image/jpeg`, with its hazard flag in
/// `X-Fire-Hazard`.
pub async fn latest(State(state): State<AppState>) -> AppResult<Response> {
    let image = ImageDataRepo::latest_binary(&state.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("No image data found".to_string()))?;

    let hazard = HeaderValue::from_static(if image.is_fire_hazard { "true" } else { "false" });
    Ok((
        [
            (CONTENT_TYPE, HeaderValue::from_static("image/jpeg")),
            (HeaderName::from_static(FIRE_HAZARD_HEADER), hazard),
        ],
        image.image_binary,
    )
        .into_response())
}

/// GET /api/images/latest/meta
pub async fn latest_meta(State(state): State<AppState>) -> AppResult<Json<DataResponse<ImageData>>> {
    let row = ImageDataRepo::latest(&state.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("No image metadata found".to_string()))?;
    Ok(Json(DataResponse { data: row }))
}
