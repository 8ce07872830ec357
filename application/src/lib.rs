//! Application layer for esg-analyzer
//!
//! This crate contains use cases, port definitions, the task registry,
//! and application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod registry;
pub mod use_cases;

// Re-export commonly used types
pub use config::OrchestratorParams;
pub use ports::{
    audit::{AuditAction, AuditEvent, AuditSink, NoAudit},
    compliance_checker::{ComplianceChecker, ComplianceError},
    insight_classifier::{ClassifierError, InsightClassifier},
    progress::{AnalysisBranch, AnalysisProgressNotifier, NoProgress},
    reference_source::{ReferenceError, ReferenceSource},
};
pub use registry::{RegistryStats, TaskRegistry};
pub use use_cases::orchestrator::{AnalysisOrchestrator, OrchestratorError};
pub use use_cases::run_analysis::{RunAnalysisError, RunAnalysisUseCase};
pub use use_cases::validate_record::ValidateRecordUseCase;
