//! Repository for the `sensor_data` table (append-only time series).

use firewatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::sensor_data::{CreateSensorData, SensorData};

/// Column list for `sensor_data` SELECT queries.
const COLUMNS: &str = "id, device_id, temperature, humidity, pressure, date_created";

/// Newest-first ordering; `id` breaks ties between rows stored in the same
/// instant.
const NEWEST_FIRST: &str = "ORDER BY date_created DESC, id DESC";

/// Provides query operations for sensor readings.
pub struct SensorDataRepo;

impl SensorDataRepo {
    /// Insert a reading, stamped with the database clock.
    pub async fn insert(pool: &PgPool, input: &CreateSensorData) -> Result<SensorData, sqlx::Error> {
        let query = format!(
            "INSERT INTO sensor_data (device_id, temperature, humidity, pressure) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SensorData>(&query)
            .bind(&input.device_id)
            .bind(input.temperature)
            .bind(input.humidity)
            .bind(input.pressure)
            .fetch_one(pool)
            .await
    }

    /// Find a reading by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SensorData>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sensor_data WHERE id = $1");
        sqlx::query_as::<_, SensorData>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Page through readings, newest first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SensorData>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sensor_data {NEWEST_FIRST} LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, SensorData>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// The `limit` most recent readings, newest first.
    pub async fn most_recent(pool: &PgPool, limit: i64) -> Result<Vec<SensorData>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sensor_data {NEWEST_FIRST} LIMIT $1");
        sqlx::query_as::<_, SensorData>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
