//! Periodic fire-risk evaluation.
//!
//! Runs one evaluation per tick so the camera is triggered even when no
//! client is polling `/api/predict`. Each tick runs to completion before the
//! next one starts; missed ticks are delayed rather than bunched up.

use std::time::Duration;

use firewatch_core::evaluation::{EvaluationError, EvaluationResult, Evaluator};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Run the risk monitor loop until `cancel` is triggered.
pub async fn run(evaluator: Evaluator, period: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = period.as_secs(), "Risk monitor started");

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Risk monitor stopping");
                break;
            }
            _ = interval.tick() => {
                tick(&evaluator).await;
            }
        }
    }
}

/// Run a single evaluation and log its outcome.
pub async fn tick(evaluator: &Evaluator) -> Option<EvaluationResult> {
    match evaluator.evaluate().await {
        Ok(result) => {
            let risk = result.assessment.risk;
            if risk.is_elevated() {
                tracing::warn!(
                    %risk,
                    message = %result.assessment.message,
                    temperature = result.latest_reading.temperature,
                    humidity = result.latest_reading.humidity,
                    "Elevated fire risk"
                );
            } else {
                tracing::debug!(%risk, message = %result.assessment.message, "Risk evaluated");
            }
            Some(result)
        }
        Err(EvaluationError::NoData) => {
            tracing::debug!("Risk monitor: no sensor data yet");
            None
        }
        Err(e) => {
            tracing::error!(error = %e, "Risk monitor: evaluation failed");
            None
        }
    }
}
