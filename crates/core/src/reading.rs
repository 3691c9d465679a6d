//! Environmental sensor readings and ingestion validation.
//!
//! A [`Reading`] is the immutable view of one stored sample that the risk
//! classifier works on. The validation helpers are applied to incoming
//! samples before they reach the store.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Device id recorded when a sensor does not identify itself.
pub const DEFAULT_DEVICE_ID: &str = "unknown_device";

/// Maximum device id length (matches the column width used by the devices).
pub const MAX_DEVICE_ID_LEN: usize = 50;

/// Operating range of the temperature sensor, in °C.
pub const TEMPERATURE_RANGE_C: (f64, f64) = (-40.0, 125.0);

/// A single temperature / humidity / pressure sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity, percent.
    pub humidity: f64,
    /// Barometric pressure as reported by the device.
    pub pressure: f64,
    /// When the sample was stored.
    pub timestamp: Timestamp,
}

/// Validate the three measured values of an incoming sample.
pub fn validate_measurements(
    temperature: f64,
    humidity: f64,
    pressure: f64,
) -> Result<(), CoreError> {
    let (min_temp, max_temp) = TEMPERATURE_RANGE_C;
    if !temperature.is_finite() || !(min_temp..=max_temp).contains(&temperature) {
        return Err(CoreError::Validation(format!(
            "temperature must be between {min_temp} and {max_temp}, got {temperature}"
        )));
    }
    if !humidity.is_finite() || !(0.0..=100.0).contains(&humidity) {
        return Err(CoreError::Validation(format!(
            "humidity must be between 0 and 100, got {humidity}"
        )));
    }
    if !pressure.is_finite() || pressure <= 0.0 {
        return Err(CoreError::Validation(format!(
            "pressure must be a positive number, got {pressure}"
        )));
    }
    Ok(())
}

/// Validate a device identifier.
///
/// Device ids double as directory names for stored captures, so only ASCII
/// alphanumerics, `_` and `-` are accepted.
pub fn validate_device_id(device_id: &str) -> Result<(), CoreError> {
    if device_id.is_empty() || device_id.len() > MAX_DEVICE_ID_LEN {
        return Err(CoreError::Validation(format!(
            "device_id must be 1-{MAX_DEVICE_ID_LEN} characters"
        )));
    }
    if !device_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(CoreError::Validation(format!(
            "device_id contains invalid characters: {device_id}"
        )));
    }
    Ok(())
}
