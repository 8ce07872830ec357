//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation
//! adapters must implement.

pub mod audit;
pub mod compliance_checker;
pub mod insight_classifier;
pub mod progress;
pub mod reference_source;

pub use audit::{AuditAction, AuditEvent, AuditSink, NoAudit};
pub use compliance_checker::{ComplianceChecker, ComplianceError};
pub use insight_classifier::{ClassifierError, InsightClassifier};
pub use progress::{AnalysisBranch, AnalysisProgressNotifier, NoProgress};
pub use reference_source::{ReferenceError, ReferenceSource};
