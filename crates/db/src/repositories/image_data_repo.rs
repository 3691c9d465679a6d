//! Repository for the `image_data` table.

use sqlx::PgPool;

use crate::models::image_data::{CreateImageData, ImageBinary, ImageData, ImageFilter};

/// Metadata columns (everything except `image_binary`).
const COLUMNS: &str = "\
    id, device_id, filename, filepath, sensor_data_id, is_fire_hazard, \"timestamp\"";

const NEWEST_FIRST: &str = "ORDER BY \"timestamp\" DESC, id DESC";

/// Provides query operations for camera captures.
pub struct ImageDataRepo;

impl ImageDataRepo {
    /// Insert a capture and return its metadata.
    pub async fn insert(pool: &PgPool, input: &CreateImageData) -> Result<ImageData, sqlx::Error> {
        let query = format!(
            "INSERT INTO image_data (device_id, filename, filepath, image_binary, sensor_data_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ImageData>(&query)
            .bind(&input.device_id)
            .bind(&input.filename)
            .bind(&input.filepath)
            .bind(&input.image_binary)
            .bind(input.sensor_data_id)
            .fetch_one(pool)
            .await
    }

    /// List capture metadata matching `filter`, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &ImageFilter,
        limit: i64,
    ) -> Result<Vec<ImageData>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM image_data \
             WHERE ($1::TEXT IS NULL OR device_id = $1) \
               AND ($2::BIGINT IS NULL OR sensor_data_id = $2) \
             {NEWEST_FIRST} LIMIT $3"
        );
        sqlx::query_as::<_, ImageData>(&query)
            .bind(filter.device_id.as_deref())
            .bind(filter.sensor_data_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Metadata for every capture, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ImageData>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM image_data {NEWEST_FIRST}");
        sqlx::query_as::<_, ImageData>(&query).fetch_all(pool).await
    }

    /// Metadata of the newest capture.
    pub async fn latest(pool: &PgPool) -> Result<Option<ImageData>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM image_data {NEWEST_FIRST} LIMIT 1");
        sqlx::query_as::<_, ImageData>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Bytes of the newest capture.
    pub async fn latest_binary(pool: &PgPool) -> Result<Option<ImageBinary>, sqlx::Error> {
        let query =
            format!("SELECT image_binary, is_fire_hazard FROM image_data {NEWEST_FIRST} LIMIT 1");
        sqlx::query_as::<_, ImageBinary>(&query)
            .fetch_optional(pool)
            .await
    }
}
