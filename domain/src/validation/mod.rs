//! Validation domain module
//!
//! Schema-driven completeness and range checks, statistical outlier
//! detection, pattern analysis and the quality scoring that condenses
//! them into a single verdict per record.

pub mod anomaly;
pub mod config;
pub mod engine;
pub mod quality;
pub mod result;
pub mod schema;
pub mod stats;

pub use anomaly::{AnomalyKind, AnomalySeverity, DataAnomaly};
pub use config::{SeverityPenalties, ValidationConfig};
pub use engine::ValidationEngine;
pub use quality::{DataQuality, QualityDimension, QualityWeights};
pub use result::ValidationResult;
pub use schema::{ExpectedSchema, FieldKind, FieldSpec};
pub use stats::{ReferenceStats, ReferenceTable};
