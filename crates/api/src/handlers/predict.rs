//! Handler for the fire-risk prediction endpoint.

use axum::extract::State;
use axum::Json;
use firewatch_core::reading::Reading;
use firewatch_core::risk::Assessment;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// The latest reading and the risk derived from it.
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub reading: Reading,
    pub prediction: Assessment,
}

/// GET /api/predict
///
/// Evaluate the current fire risk. Responds 404 `NO_DATA` when no reading
/// has been stored yet. A degraded evaluation is still a 200 with
/// `risk = "UNKNOWN"`.
pub async fn predict(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<PredictionResponse>>> {
    let result = state.evaluator.evaluate().await?;
    Ok(Json(DataResponse {
        data: PredictionResponse {
            reading: result.latest_reading,
            prediction: result.assessment,
        },
    }))
}
