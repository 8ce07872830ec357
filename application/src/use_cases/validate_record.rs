//! Validate Record use case
//!
//! Standalone validation, independent of the task pipeline. Useful as a
//! cheap pre-check before paying for classifier calls.

use crate::ports::audit::{AuditAction, AuditEvent, AuditSink};
use esg_domain::{DomainError, EsgRecord, ValidationEngine, ValidationResult};
use std::sync::Arc;
use tracing::debug;

/// Use case for validating a single record
pub struct ValidateRecordUseCase {
    engine: Arc<ValidationEngine>,
    audit: Arc<dyn AuditSink>,
}

impl ValidateRecordUseCase {
    pub fn new(engine: Arc<ValidationEngine>, audit: Arc<dyn AuditSink>) -> Self {
        Self { engine, audit }
    }

    /// Validate the record and note the run in the audit trail.
    ///
    /// An invalid-but-complete record is a normal result; only malformed
    /// input (empty record, non-finite values) is an error.
    pub fn execute(&self, record: &EsgRecord) -> Result<ValidationResult, DomainError> {
        debug!("Validating record with {} fields", record.field_count());
        let result = self.engine.validate(record)?;
        self.audit.record(
            AuditEvent::new(AuditAction::ValidationRun).with_detail(format!(
                "score {:.1}, {} errors, {} warnings",
                result.score,
                result.errors.len(),
                result.warnings.len()
            )),
        );
        Ok(result)
    }
}
