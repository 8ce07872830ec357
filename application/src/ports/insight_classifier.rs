//! Insight classifier port
//!
//! Defines the interface for the external scoring backend that turns a
//! category's raw fields into a scored insight.

use async_trait::async_trait;
use esg_domain::{CategoryInsight, EsgCategory, EsgRecord};
use thiserror::Error;

/// Errors that can occur during classifier operations
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Classifier returned an unusable response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Scoring backend for category insights
///
/// This port defines how the application layer obtains per-category
/// scores. Implementations (adapters) live in the infrastructure layer.
/// Any error, of any variant, is read by callers as "backend
/// unavailable": the use case wraps every call in a timeout and
/// substitutes heuristic scores, so a classifier failure can never fail
/// an analysis. The variants exist for log quality, not for control
/// flow.
#[async_trait]
pub trait InsightClassifier: Send + Sync {
    /// Score one category of a record
    async fn classify(
        &self,
        category: EsgCategory,
        record: &EsgRecord,
    ) -> Result<CategoryInsight, ClassifierError>;

    /// Short name for logs and reports
    fn name(&self) -> &str;
}
