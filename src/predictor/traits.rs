//! Trait abstraction for the price model to enable mocking in tests

use crate::state::FeatureRecord;
use anyhow::Result;
use async_trait::async_trait;

/// Black-box price model
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PredictorTrait: Send + Sync {
    /// Predict the price of the apartment described by `features`
    async fn predict(&self, features: &FeatureRecord, artifact_path: &str, mode: &str)
        -> Result<f64>;
}
