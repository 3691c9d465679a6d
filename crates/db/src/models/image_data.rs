//! Camera capture rows.
//!
//! The binary payload is kept out of [`ImageData`] so listings stay small;
//! use [`ImageBinary`] when the bytes are needed.

use firewatch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Capture metadata.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ImageData {
    pub id: DbId,
    pub device_id: String,
    pub filename: String,
    pub filepath: String,
    pub sensor_data_id: Option<DbId>,
    pub is_fire_hazard: bool,
    pub timestamp: Timestamp,
}

/// Raw bytes of a capture plus the hazard flag served alongside them.
#[derive(Debug, Clone, FromRow)]
pub struct ImageBinary {
    pub image_binary: Vec<u8>,
    pub is_fire_hazard: bool,
}

/// DTO for inserting a capture.
#[derive(Debug, Clone)]
pub struct CreateImageData {
    pub device_id: String,
    pub filename: String,
    pub filepath: String,
    pub image_binary: Vec<u8>,
    pub sensor_data_id: Option<DbId>,
}

/// Optional filters for listing captures.
#[derive(Debug, Clone, Default)]
pub struct ImageFilter {
    pub device_id: Option<String>,
    pub sensor_data_id: Option<DbId>,
}
