//! Row models and insert DTOs.

pub mod image_data;
pub mod sensor_data;
