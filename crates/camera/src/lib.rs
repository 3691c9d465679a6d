//! HTTP client for the remote capture camera.
//!
//! The camera exposes a single `GET /firehazard` endpoint that takes a
//! picture and uploads it on its own. [`CameraClient`] implements
//! [`Actuator`] so the evaluator can set it off when the risk is elevated.

use std::time::Duration;

use async_trait::async_trait;
use firewatch_core::actuator::{Actuator, ActuatorError};

/// Path on the camera that triggers a capture.
pub const TRIGGER_PATH: &str = "/firehazard";

/// Default HTTP timeout for a trigger request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from talking to the camera.
#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The camera returned a non-2xx status code.
    #[error("Camera returned HTTP {0}")]
    HttpStatus(u16),
}

impl From<CameraError> for ActuatorError {
    fn from(err: CameraError) -> Self {
        match err {
            CameraError::Request(e) => ActuatorError::Unreachable(e.to_string()),
            CameraError::HttpStatus(status) => ActuatorError::Rejected(status),
        }
    }
}

// ---------------------------------------------------------------------------
// CameraClient
// ---------------------------------------------------------------------------

/// Triggers captures on one camera.
pub struct CameraClient {
    client: reqwest::Client,
    trigger_url: String,
}

impl CameraClient {
    /// Create a client for the camera at `base_url`, e.g. `http://192.168.1.40`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CameraError> {
        // The camera sits on the local network; never route it via a proxy.
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            trigger_url: format!("{}{TRIGGER_PATH}", base_url.trim_end_matches('/')),
        }
    }

    /// Full URL hit by [`CameraClient::capture`].
    pub fn trigger_url(&self) -> &str {
        &self.trigger_url
    }

    /// Ask the camera to take a picture.
    pub async fn capture(&self) -> Result<(), CameraError> {
        tracing::debug!(url = %self.trigger_url, "Requesting camera capture");
        let response = self.client.get(&self.trigger_url).send().await?;
        if !response.status().is_success() {
            return Err(CameraError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl Actuator for CameraClient {
    fn name(&self) -> &str {
        "camera"
    }

    async fn trigger(&self) -> Result<(), ActuatorError> {
        self.capture().await.map_err(ActuatorError::from)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
