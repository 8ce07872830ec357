//! Reference distribution source port

use async_trait::async_trait;
use esg_domain::ReferenceTable;
use thiserror::Error;

/// Errors that can occur while loading reference distributions
#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Failed to read reference data: {0}")]
    ReadError(String),

    #[error("Malformed reference data: {0}")]
    ParseError(String),
}

/// Supplies historical baselines for outlier detection
///
/// A missing table is not an error: validation falls back to the
/// record-internal IQR test when no baseline is available.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    /// Load the reference table, or `None` when no baseline exists
    async fn load(&self) -> Result<Option<ReferenceTable>, ReferenceError>;
}
