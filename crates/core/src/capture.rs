//! Naming and format checks for camera captures.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Extension used for stored captures.
pub const CAPTURE_EXTENSION: &str = "jpg";

/// JPEG start-of-image marker.
const JPEG_SOI: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Whether `bytes` starts with a JPEG start-of-image marker.
pub fn is_jpeg(bytes: &[u8]) -> bool {
    bytes.starts_with(&JPEG_SOI)
}

/// Reject empty or non-JPEG uploads.
pub fn validate_capture(bytes: &[u8]) -> Result<(), CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::Validation("image is empty".to_string()));
    }
    if !is_jpeg(bytes) {
        return Err(CoreError::Validation("image must be a JPEG".to_string()));
    }
    Ok(())
}

/// Build the stored file name for a capture:
/// `{device_id}_{YYYYmmdd_HHMMSS}_{suffix}.jpg`.
///
/// `suffix` disambiguates captures taken within the same second; only its
/// first 8 characters are used.
pub fn capture_filename(device_id: &str, taken_at: Timestamp, suffix: &str) -> String {
    let short: String = suffix.chars().take(8).collect();
    format!(
        "{device_id}_{}_{short}.{CAPTURE_EXTENSION}",
        taken_at.format("%Y%m%d_%H%M%S")
    )
}
