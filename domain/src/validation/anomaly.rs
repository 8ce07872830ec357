//! Anomaly value objects produced by validation

use serde::{Deserialize, Serialize};

/// Kind of anomaly detected in a record
///
/// The declaration order is the canonical order used to break ties when
/// ranking anomaly kinds by frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// Value far from its reference distribution
    Outlier,
    /// Expected field absent from the record
    Missing,
    /// Identical value repeated across fields that should differ
    Inconsistent,
    /// Value looks like placeholder or test data
    Suspicious,
}

impl AnomalyKind {
    pub fn as_str(&self) -> &str {
        match self {
            AnomalyKind::Outlier => "outlier",
            AnomalyKind::Missing => "missing",
            AnomalyKind::Inconsistent => "inconsistent",
            AnomalyKind::Suspicious => "suspicious",
        }
    }

    /// All kinds in canonical order
    pub fn all() -> [AnomalyKind; 4] {
        [
            AnomalyKind::Outlier,
            AnomalyKind::Missing,
            AnomalyKind::Inconsistent,
            AnomalyKind::Suspicious,
        ]
    }
}

impl std::fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How strongly an anomaly deviates from the expected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalySeverity {
    Low,
    Medium,
    High,
}

impl AnomalySeverity {
    pub fn as_str(&self) -> &str {
        match self {
            AnomalySeverity::Low => "low",
            AnomalySeverity::Medium => "medium",
            AnomalySeverity::High => "high",
        }
    }
}

impl std::fmt::Display for AnomalySeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single detected anomaly (Value Object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataAnomaly {
    /// What class of problem this is
    pub kind: AnomalyKind,
    /// Qualified field name, e.g. `environmental.emissions`
    pub field: String,
    /// The reported value, when the anomaly concerns a number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed: Option<f64>,
    /// The `(low, high)` range the value was expected to fall in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_range: Option<(f64, f64)>,
    /// How severe the deviation is
    pub severity: AnomalySeverity,
    /// Human-readable explanation
    pub description: String,
}

impl DataAnomaly {
    pub fn new(
        kind: AnomalyKind,
        field: impl Into<String>,
        severity: AnomalySeverity,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            field: field.into(),
            observed: None,
            expected_range: None,
            severity,
            description: description.into(),
        }
    }

    /// An expected field that is absent from the record
    pub fn missing(field: impl Into<String>) -> Self {
        let field = field.into();
        let description = format!("Expected field {field} is missing");
        Self::new(AnomalyKind::Missing, field, AnomalySeverity::Medium, description)
    }

    pub fn with_observed(mut self, value: f64) -> Self {
        self.observed = Some(value);
        self
    }

    pub fn with_expected_range(mut self, low: f64, high: f64) -> Self {
        self.expected_range = Some((low, high));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(AnomalySeverity::High > AnomalySeverity::Medium);
        assert!(AnomalySeverity::Medium > AnomalySeverity::Low);
    }

    #[test]
    fn test_missing_constructor() {
        let anomaly = DataAnomaly::missing("social.employee_count");
        assert_eq!(anomaly.kind, AnomalyKind::Missing);
        assert_eq!(anomaly.severity, AnomalySeverity::Medium);
        assert!(anomaly.description.contains("social.employee_count"));
        assert!(anomaly.observed.is_none());
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let anomaly = DataAnomaly::missing("governance.board_size");
        let json = serde_json::to_string(&anomaly).unwrap();
        assert!(json.contains("\"kind\":\"missing\""));
        assert!(!json.contains("observed"));
        assert!(!json.contains("expected_range"));

        let full = DataAnomaly::new(
            AnomalyKind::Outlier,
            "environmental.emissions",
            AnomalySeverity::High,
            "z-score 4.2 exceeds threshold",
        )
        .with_observed(900_000.0)
        .with_expected_range(0.0, 400_000.0);
        let json = serde_json::to_string(&full).unwrap();
        assert!(json.contains("\"observed\":900000.0"));
        assert!(json.contains("\"expected_range\":[0.0,400000.0]"));
    }
}
