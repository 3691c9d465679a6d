//! One evaluation: fetch latest -> fetch previous -> classify -> maybe trigger.
//!
//! The [`Evaluator`] holds no state between calls; every evaluation is derived
//! from freshly fetched readings, so concurrent evaluations are safe.

use std::sync::Arc;

use serde::Serialize;

use crate::actuator::{self, Actuator};
use crate::reading::Reading;
use crate::risk::{classify, Assessment};
use crate::store::{ReadingStore, StoreError};

/// Errors that end an evaluation without a result.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    /// The store holds no readings at all.
    #[error("No sensor data available")]
    NoData,

    /// The latest reading could not be loaded.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The latest reading together with its assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub latest_reading: Reading,
    pub assessment: Assessment,
}

/// Composes a [`ReadingStore`], the risk classifier and an optional
/// [`Actuator`].
#[derive(Clone)]
pub struct Evaluator {
    store: Arc<dyn ReadingStore>,
    actuator: Option<Arc<dyn Actuator>>,
}

impl Evaluator {
    pub fn new(store: Arc<dyn ReadingStore>, actuator: Option<Arc<dyn Actuator>>) -> Self {
        Self { store, actuator }
    }

    /// Run one evaluation.
    ///
    /// Fails only when the store is empty or the latest reading cannot be
    /// loaded. A failure while loading the previous reading degrades the
    /// assessment to `UNKNOWN`. For `MEDIUM` and `HIGH` the actuator is
    /// dispatched once and not awaited.
    pub async fn evaluate(&self) -> Result<EvaluationResult, EvaluationError> {
        let latest = self
            .store
            .most_recent(1)
            .await?
            .into_iter()
            .next()
            .ok_or(EvaluationError::NoData)?;

        // Separate read: a reading stored in between makes `latest` its own
        // predecessor (delta 0.0) for this one evaluation.
        let assessment = match self.store.most_recent(2).await {
            Ok(readings) => classify(&latest, readings.get(1)),
            Err(e) => {
                tracing::warn!(error = %e, "Previous reading unavailable, risk undetermined");
                Assessment::undetermined()
            }
        };

        if assessment.risk.is_elevated() {
            self.trigger(&assessment);
        }

        Ok(EvaluationResult {
            latest_reading: latest,
            assessment,
        })
    }

    fn trigger(&self, assessment: &Assessment) {
        match &self.actuator {
            Some(actuator) => {
                // Detached: the result must not wait on the actuator.
                drop(actuator::dispatch(Arc::clone(actuator), assessment.risk));
            }
            None => {
                tracing::debug!(risk = %assessment.risk, "No actuator configured, skipping trigger");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use tokio::sync::mpsc;

    use super::*;
    use crate::actuator::ActuatorError;
    use crate::risk::{RiskLevel, MSG_UNDETERMINED};

    fn reading(minute: u32, temperature: f64, humidity: f64) -> Reading {
        Reading {
            temperature,
            humidity,
            pressure: 1008.5,
            timestamp: Utc.with_ymd_and_hms(2025, 4, 1, 12, minute, 0).unwrap(),
        }
    }

    /// Store backed by a newest-first vector. Fails every call numbered in
    /// `fail_calls` (1-based).
    struct MemoryStore {
        readings: Vec<Reading>,
        fail_calls: Vec<usize>,
        calls: AtomicUsize,
    }

    impl MemoryStore {
        fn new(readings: Vec<Reading>) -> Self {
            Self {
                readings,
                fail_calls: Vec::new(),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing_on(mut self, calls: &[usize]) -> Self {
            self.fail_calls = calls.to_vec();
            self
        }
    }

    #[async_trait]
    impl ReadingStore for MemoryStore {
        async fn most_recent(&self, limit: i64) -> Result<Vec<Reading>, StoreError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_calls.contains(&call) {
                return Err(StoreError::new("connection reset by peer"));
            }
            let limit = usize::try_from(limit).unwrap_or(0);
            Ok(self.readings.iter().take(limit).copied().collect())
        }
    }

    /// Actuator that reports every trigger on a channel.
    struct ChannelActuator {
        tx: mpsc::UnboundedSender<()>,
        fail: bool,
    }

    #[async_trait]
    impl Actuator for ChannelActuator {
        fn name(&self) -> &str {
            "channel"
        }

        async fn trigger(&self) -> Result<(), ActuatorError> {
            let _ = self.tx.send(());
            if self.fail {
                Err(ActuatorError::Unreachable("camera offline".into()))
            } else {
                Ok(())
            }
        }
    }

    fn evaluator(
        store: MemoryStore,
        fail_actuator: bool,
    ) -> (Evaluator, mpsc::UnboundedReceiver<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let actuator: Arc<dyn Actuator> = Arc::new(ChannelActuator {
            tx,
            fail: fail_actuator,
        });
        (Evaluator::new(Arc::new(store), Some(actuator)), rx)
    }

    async fn expect_trigger(rx: &mut mpsc::UnboundedReceiver<()>) {
        tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("actuator was not triggered")
            .expect("actuator channel closed");
    }

    async fn expect_no_trigger(rx: &mut mpsc::UnboundedReceiver<()>) {
        let res = tokio::time::timeout(Duration::from_millis(100), rx.recv()).await;
        assert!(res.is_err(), "actuator should not have been triggered");
    }

    #[tokio::test]
    async fn empty_store_is_no_data() {
        let (eval, mut rx) = evaluator(MemoryStore::new(vec![]), false);
        assert_matches!(eval.evaluate().await, Err(EvaluationError::NoData));
        expect_no_trigger(&mut rx).await;
    }

    #[tokio::test]
    async fn primary_lookup_failure_is_store_error() {
        let store = MemoryStore::new(vec![reading(1, 20.0, 50.0)]).failing_on(&[1]);
        let (eval, _rx) = evaluator(store, false);
        assert_matches!(eval.evaluate().await, Err(EvaluationError::Store(_)));
    }

    #[tokio::test]
    async fn single_reading_uses_baseline_rules() {
        let latest = reading(1, 65.0, 50.0);
        let (eval, mut rx) = evaluator(MemoryStore::new(vec![latest]), false);

        let result = eval.evaluate().await.unwrap();
        assert_eq!(result.latest_reading, latest);
        assert_eq!(result.assessment.risk, RiskLevel::High);
        assert_eq!(result.assessment.message, "Immediate fire risk detected!");
        expect_trigger(&mut rx).await;
    }

    #[tokio::test]
    async fn compares_against_previous_reading() {
        let store = MemoryStore::new(vec![
            reading(2, 56.0, 60.0),
            reading(1, 50.0, 60.0),
            reading(0, 10.0, 60.0),
        ]);
        let (eval, mut rx) = evaluator(store, false);

        let result = eval.evaluate().await.unwrap();
        assert_eq!(result.assessment.risk, RiskLevel::High);
        assert_eq!(result.assessment.message, "Sudden temperature rise of 6.0°");
        expect_trigger(&mut rx).await;
    }

    #[tokio::test]
    async fn elevated_risk_triggers_exactly_once() {
        let store = MemoryStore::new(vec![reading(2, 52.3, 60.0), reading(1, 50.0, 60.0)]);
        let (eval, mut rx) = evaluator(store, false);

        let result = eval.evaluate().await.unwrap();
        assert_eq!(result.assessment.risk, RiskLevel::Medium);
        expect_trigger(&mut rx).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err(), "actuator triggered more than once");
    }

    #[tokio::test]
    async fn low_risk_does_not_trigger() {
        let store = MemoryStore::new(vec![reading(2, 50.5, 60.0), reading(1, 50.0, 60.0)]);
        let (eval, mut rx) = evaluator(store, false);

        let result = eval.evaluate().await.unwrap();
        assert_eq!(result.assessment.risk, RiskLevel::Low);
        expect_no_trigger(&mut rx).await;
    }

    #[tokio::test]
    async fn previous_lookup_failure_degrades_to_unknown() {
        let latest = reading(2, 70.0, 10.0);
        let store = MemoryStore::new(vec![latest, reading(1, 20.0, 60.0)]).failing_on(&[2]);
        let (eval, mut rx) = evaluator(store, false);

        let result = eval.evaluate().await.unwrap();
        assert_eq!(result.latest_reading, latest);
        assert_eq!(result.assessment.risk, RiskLevel::Unknown);
        assert_eq!(result.assessment.message, MSG_UNDETERMINED);
        expect_no_trigger(&mut rx).await;
    }

    #[tokio::test]
    async fn actuator_failure_does_not_change_result() {
        let store = MemoryStore::new(vec![reading(1, 65.0, 50.0)]);
        let (eval, mut rx) = evaluator(store, true);

        let result = eval.evaluate().await.unwrap();
        assert_eq!(result.assessment.risk, RiskLevel::High);
        expect_trigger(&mut rx).await;
    }

    #[tokio::test]
    async fn missing_actuator_is_skipped() {
        let eval = Evaluator::new(
            Arc::new(MemoryStore::new(vec![reading(1, 65.0, 50.0)])),
            None,
        );
        let result = eval.evaluate().await.unwrap();
        assert_eq!(result.assessment.risk, RiskLevel::High);
    }

    #[tokio::test]
    async fn repeated_evaluations_are_independent() {
        let store = MemoryStore::new(vec![reading(2, 52.3, 60.0), reading(1, 50.0, 60.0)]);
        let (eval, mut rx) = evaluator(store, false);

        let first = eval.evaluate().await.unwrap();
        let second = eval.evaluate().await.unwrap();
        assert_eq!(first, second);
        expect_trigger(&mut rx).await;
        expect_trigger(&mut rx).await;
    }
}
