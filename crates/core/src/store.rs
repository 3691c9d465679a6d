//! Read-side seam between the evaluator and whatever persists readings.

use async_trait::async_trait;

use crate::reading::Reading;

/// Failure reported by a [`ReadingStore`].
///
/// Distinct from an empty result: a store with no readings returns
/// `Ok(vec![])`.
#[derive(Debug, thiserror::Error)]
#[error("Reading store error: {0}")]
pub struct StoreError(#[source] Box<dyn std::error::Error + Send + Sync>);

impl StoreError {
    pub fn new(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(err.into())
    }
}

/// Ordered access to stored sensor readings.
#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Return up to `limit` readings, newest first.
    async fn most_recent(&self, limit: i64) -> Result<Vec<Reading>, StoreError>;
}
