//! Infrastructure layer for esg-analyzer
//!
//! This crate contains the adapters behind the application layer's
//! ports, plus configuration file loading. Nothing here is consulted
//! by the domain; swapping an adapter never changes analysis results.

pub mod audit;
pub mod classifier;
pub mod compliance;
pub mod config;
pub mod reference;

// Re-export commonly used types
pub use audit::JsonlAuditSink;
#[cfg(feature = "http-classifier")]
pub use classifier::HttpInsightClassifier;
pub use classifier::LocalInsightClassifier;
pub use compliance::RuleTableComplianceChecker;
pub use config::{ClassifierBackend, ConfigIssue, ConfigLoader, FileConfig, IssueSeverity};
pub use reference::{StaticReferenceSource, TomlReferenceSource};
