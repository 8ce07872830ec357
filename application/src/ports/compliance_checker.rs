//! Compliance checker port

use async_trait::async_trait;
use esg_domain::{ComplianceResult, EsgRecord};
use thiserror::Error;

/// Errors that can occur during compliance checking
#[derive(Error, Debug)]
pub enum ComplianceError {
    #[error("Unknown framework: {0}")]
    UnknownFramework(String),

    #[error("No frameworks configured")]
    NoFrameworks,

    #[error("Other error: {0}")]
    Other(String),
}

/// Checks a record against one reporting framework at a time
///
/// The default implementation evaluates declarative requirement tables
/// and is infallible once constructed; the port stays fallible so that
/// richer adapters (remote rule services, per-tenant rule stores) fit
/// behind the same seam. Callers iterate [`frameworks`](Self::frameworks)
/// and fold the results into a summary.
#[async_trait]
pub trait ComplianceChecker: Send + Sync {
    /// Evaluate a single framework against the record
    async fn check(
        &self,
        record: &EsgRecord,
        framework: &str,
    ) -> Result<ComplianceResult, ComplianceError>;

    /// Names of the frameworks this checker applies
    fn frameworks(&self) -> Vec<String>;
}
