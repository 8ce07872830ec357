//! Orchestrator parameters — pipeline control.
//!
//! [`OrchestratorParams`] groups the static parameters that control the
//! task pipeline in
//! [`AnalysisOrchestrator`](crate::use_cases::orchestrator::AnalysisOrchestrator).
//! These are application-layer concerns, not domain policy.

use esg_domain::{DomainError, ScoreWeights};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Task pipeline control parameters.
///
/// Controls queue depth, worker concurrency and the patience granted to
/// the classifier backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorParams {
    /// How many submitted tasks may wait in the intake queue.
    pub queue_capacity: usize,
    /// How many tasks may be analyzed at the same time.
    pub max_concurrent_tasks: usize,
    /// Timeout for each classifier call before falling back to the
    /// heuristic scorer.
    pub classifier_timeout: Duration,
    /// Category weighting for the overall score.
    pub score_weights: ScoreWeights,
}

impl Default for OrchestratorParams {
    fn default() -> Self {
        Self {
            queue_capacity: 64,
            max_concurrent_tasks: 4,
            classifier_timeout: Duration::from_secs(30),
            score_weights: ScoreWeights::default(),
        }
    }
}

impl OrchestratorParams {
    // ==================== Builder Methods ====================

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn with_max_concurrent_tasks(mut self, max: usize) -> Self {
        self.max_concurrent_tasks = max;
        self
    }

    pub fn with_classifier_timeout(mut self, timeout: Duration) -> Self {
        self.classifier_timeout = timeout;
        self
    }

    pub fn with_score_weights(mut self, weights: ScoreWeights) -> Self {
        self.score_weights = weights;
        self
    }

    /// Check the parameters are usable
    pub fn validate(&self) -> Result<(), DomainError> {
        self.score_weights.validate()?;
        if self.queue_capacity == 0 {
            return Err(DomainError::InvalidConfig(
                "queue_capacity must be at least 1".to_string(),
            ));
        }
        if self.max_concurrent_tasks == 0 {
            return Err(DomainError::InvalidConfig(
                "max_concurrent_tasks must be at least 1".to_string(),
            ));
        }
        if self.classifier_timeout.is_zero() {
            return Err(DomainError::InvalidConfig(
                "classifier_timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
