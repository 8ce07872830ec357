//! Domain layer for esg-analyzer
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Records and Tasks
//!
//! An [`EsgRecord`] is one submission of environmental, social and
//! governance data. Callers wrap a record in an [`AgentTask`] naming the
//! kind of analysis they want; the task moves through a monotone
//! lifecycle (pending, processing, then completed or failed).
//!
//! ## Branches
//!
//! A full analysis fans out into independent branches:
//!
//! - **Insight**: per-category scoring, with a deterministic fallback
//!   when the classifier backend is unavailable
//! - **Compliance**: the record checked against framework requirement
//!   tables (GRI, SASB, TCFD, CSRD)
//! - **Validation**: schema, range, outlier and pattern checks condensed
//!   into a quality profile and a score
//!
//! Everything in this crate is pure and synchronous. Given the same
//! inputs, every scorer, checker and aggregator here produces the same
//! output.

pub mod analysis;
pub mod compliance;
pub mod core;
pub mod insight;
pub mod task;
pub mod validation;

// Re-export commonly used types
pub use analysis::{
    report::AnalysisReport,
    weights::{
        DEFAULT_ENVIRONMENTAL_WEIGHT, DEFAULT_GOVERNANCE_WEIGHT, DEFAULT_SOCIAL_WEIGHT,
        ScoreWeights,
    },
};
pub use compliance::{
    entities::{ComplianceResult, ComplianceStatus, ComplianceSummary},
    rules::{FrameworkRules, Requirement},
};
pub use core::{
    error::DomainError,
    record::{EsgCategory, EsgRecord, FieldValue},
};
pub use insight::{fallback::FallbackScorer, value_objects::CategoryInsight};
pub use task::{
    entities::{AgentTask, TaskKind, TaskOutput, TaskPriority, TaskStatus},
    value_objects::TaskId,
};
pub use validation::{
    anomaly::{AnomalyKind, AnomalySeverity, DataAnomaly},
    config::{SeverityPenalties, ValidationConfig},
    engine::ValidationEngine,
    quality::{DataQuality, QualityDimension, QualityWeights},
    result::ValidationResult,
    schema::{ExpectedSchema, FieldKind, FieldSpec},
    stats::{ReferenceStats, ReferenceTable},
};
