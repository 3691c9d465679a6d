//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod image_data_repo;
pub mod sensor_data_repo;

pub use image_data_repo::ImageDataRepo;
pub use sensor_data_repo::SensorDataRepo;
