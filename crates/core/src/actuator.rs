//! External side effects triggered by an elevated risk assessment.
//!
//! Triggering is best-effort and fire-and-forget: [`dispatch`] runs the
//! actuator on a detached task and only records the outcome. Callers must not
//! await the handle on a response path, and a failed trigger is never retried
//! here; the next evaluation triggers again if the risk persists.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::risk::RiskLevel;

/// Failure reported by an [`Actuator`].
#[derive(Debug, thiserror::Error)]
pub enum ActuatorError {
    /// The actuator could not be reached (connect error, DNS, timeout).
    #[error("Actuator unreachable: {0}")]
    Unreachable(String),

    /// The actuator answered with a non-success status.
    #[error("Actuator rejected trigger with HTTP {0}")]
    Rejected(u16),
}

/// Something that can be set off when the risk is elevated, e.g. a camera.
#[async_trait]
pub trait Actuator: Send + Sync {
    /// Short name used in log fields.
    fn name(&self) -> &str;

    /// Perform the side effect once.
    async fn trigger(&self) -> Result<(), ActuatorError>;
}

/// Trigger `actuator` on a detached task.
///
/// The outcome is logged and otherwise discarded. The returned handle is only
/// useful to tests and shutdown code; dropping it does not cancel the task.
pub fn dispatch(actuator: Arc<dyn Actuator>, risk: RiskLevel) -> JoinHandle<()> {
    tokio::spawn(async move {
        match actuator.trigger().await {
            Ok(()) => {
                tracing::info!(actuator = actuator.name(), %risk, "Actuator triggered");
            }
            Err(e) => {
                tracing::warn!(
                    actuator = actuator.name(),
                    %risk,
                    error = %e,
                    "Actuator trigger failed"
                );
            }
        }
    })
}
