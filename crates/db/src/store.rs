//! [`ReadingStore`] backed by the `sensor_data` table.

use async_trait::async_trait;
use firewatch_core::reading::Reading;
use firewatch_core::store::{ReadingStore, StoreError};

use crate::repositories::SensorDataRepo;
use crate::DbPool;

/// Reads sensor samples straight from PostgreSQL.
#[derive(Clone)]
pub struct PgReadingStore {
    pool: DbPool,
}

impl PgReadingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadingStore for PgReadingStore {
    async fn most_recent(&self, limit: i64) -> Result<Vec<Reading>, StoreError> {
        let rows = SensorDataRepo::most_recent(&self.pool, limit)
            .await
            .map_err(StoreError::new)?;
        Ok(rows.into_iter().map(Reading::from).collect())
    }
}
