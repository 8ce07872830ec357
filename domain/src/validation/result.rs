//! Validation outcome value objects

use super::anomaly::{AnomalyKind, DataAnomaly};
use super::quality::DataQuality;
use serde::{Deserialize, Serialize};

/// Everything validation found out about one record (Value Object)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the record passed: no hard errors and score at or above
    /// the pass threshold
    pub is_valid: bool,
    /// Weighted quality score minus anomaly penalties, 0 to 100
    pub score: f64,
    /// Hard violations that make the record fail outright
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    /// Findings worth attention that do not fail the record
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Statistical and structural anomalies
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anomalies: Vec<DataAnomaly>,
    /// Per-dimension quality breakdown
    pub data_quality: DataQuality,
    /// Deterministic improvement suggestions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

impl ValidationResult {
    /// Anomalies of one kind, in detection order
    pub fn anomalies_of_kind(&self, kind: AnomalyKind) -> impl Iterator<Item = &DataAnomaly> {
        self.anomalies.iter().filter(move |a| a.kind == kind)
    }

    pub fn has_anomaly(&self, kind: AnomalyKind) -> bool {
        self.anomalies.iter().any(|a| a.kind == kind)
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn anomaly_count(&self) -> usize {
        self.anomalies.len()
    }
}
