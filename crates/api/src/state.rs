use std::sync::Arc;
use std::time::Duration;

use firewatch_camera::{CameraClient, CameraError};
use firewatch_core::actuator::Actuator;
use firewatch_core::evaluation::Evaluator;
use firewatch_db::PgReadingStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: firewatch_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Risk evaluator wired to the reading store and (optionally) the camera.
    pub evaluator: Evaluator,
}

impl AppState {
    /// Wire the evaluator from configuration.
    ///
    /// A camera client is only created when `CAMERA_URL` is set.
    pub fn from_config(pool: firewatch_db::DbPool, config: ServerConfig) -> Result<Self, CameraError> {
        let actuator: Option<Arc<dyn Actuator>> = match &config.camera_url {
            Some(url) => {
                let client =
                    CameraClient::new(url, Duration::from_secs(config.camera_timeout_secs))?;
                tracing::info!(url = %client.trigger_url(), "Camera trigger enabled");
                let client: Arc<dyn Actuator> = Arc::new(client);
                Some(client)
            }
            None => {
                tracing::info!("CAMERA_URL not set, camera trigger disabled");
                None
            }
        };

        Ok(Self::with_actuator(pool, config, actuator))
    }

    /// Build state around an explicit actuator.
    pub fn with_actuator(
        pool: firewatch_db::DbPool,
        config: ServerConfig,
        actuator: Option<Arc<dyn Actuator>>,
    ) -> Self {
        let store = Arc::new(PgReadingStore::new(pool.clone()));
        Self {
            pool,
            config: Arc::new(config),
            evaluator: Evaluator::new(store, actuator),
        }
    }
}
