//! Sensor reading rows (append-only time series).

use firewatch_core::reading::Reading;
use firewatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored sensor sample.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SensorData {
    pub id: DbId,
    pub device_id: String,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub date_created: Timestamp,
}

/// DTO for inserting a sensor sample.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSensorData {
    pub device_id: String,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
}

impl From<&SensorData> for Reading {
    fn from(row: &SensorData) -> Self {
        Reading {
            temperature: row.temperature,
            humidity: row.humidity,
            pressure: row.pressure,
            timestamp: row.date_created,
        }
    }
}

impl From<SensorData> for Reading {
    fn from(row: SensorData) -> Self {
        Reading::from(&row)
    }
}
