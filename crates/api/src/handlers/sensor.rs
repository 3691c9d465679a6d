//! Handlers for sensor reading ingestion and listing.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use firewatch_core::paging::{clamp_limit, clamp_offset, READINGS_DEFAULT_LIMIT, READINGS_MAX_LIMIT};
use firewatch_core::reading::{validate_device_id, validate_measurements, DEFAULT_DEVICE_ID};
use firewatch_db::models::sensor_data::{CreateSensorData, SensorData};
use firewatch_db::repositories::SensorDataRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body pushed by a sensor device.
#[derive(Debug, Deserialize)]
pub struct SensorPayload {
    pub device_id: Option<String>,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
}

/// POST /api/sensor
///
/// Validate and store one reading.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<SensorPayload>,
) -> AppResult<(StatusCode, Json<DataResponse<SensorData>>)> {
    let device_id = input
        .device_id
        .unwrap_or_else(|| DEFAULT_DEVICE_ID.to_string());
    validate_device_id(&device_id)?;
    validate_measurements(input.temperature, input.humidity, input.pressure)?;

    let row = SensorDataRepo::insert(
        &state.pool,
        &CreateSensorData {
            device_id,
            temperature: input.temperature,
            humidity: input.humidity,
            pressure: input.pressure,
        },
    )
    .await?;

    tracing::debug!(
        id = row.id,
        device_id = %row.device_id,
        temperature = row.temperature,
        humidity = row.humidity,
        "Sensor reading stored"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// GET /api/data
///
/// List readings newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<SensorData>>>> {
    let limit = clamp_limit(params.limit, READINGS_DEFAULT_LIMIT, READINGS_MAX_LIMIT);
    let offset = clamp_offset(params.offset);
    let rows = SensorDataRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: rows }))
}
