//! Compliance outcome entities

use serde::{Deserialize, Serialize};

/// Compliance verdict thresholds on the 0 to 100 coverage score
pub const COMPLIANT_THRESHOLD: f64 = 80.0;
pub const PARTIAL_THRESHOLD: f64 = 40.0;

/// How fully a record satisfies a framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    PartiallyCompliant,
    NonCompliant,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ComplianceStatus::Compliant => "compliant",
            ComplianceStatus::PartiallyCompliant => "partially_compliant",
            ComplianceStatus::NonCompliant => "non_compliant",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            ComplianceStatus::Compliant => "Compliant",
            ComplianceStatus::PartiallyCompliant => "Partially Compliant",
            ComplianceStatus::NonCompliant => "Non-Compliant",
        }
    }

    /// Map a coverage score to a verdict
    pub fn from_score(score: f64) -> Self {
        if score >= COMPLIANT_THRESHOLD {
            ComplianceStatus::Compliant
        } else if score >= PARTIAL_THRESHOLD {
            ComplianceStatus::PartiallyCompliant
        } else {
            ComplianceStatus::NonCompliant
        }
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Outcome of checking one record against one framework
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceResult {
    /// Framework name, e.g. `GRI`
    pub framework: String,
    pub status: ComplianceStatus,
    /// Credited requirements as a fraction of the total, 0 to 100
    pub score: f64,
    /// Total requirement credits the framework defines
    pub total_requirements: usize,
    /// Credits satisfied by the record
    pub met_requirements: usize,
    /// Names of the requirements the record does not satisfy
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_requirements: Vec<String>,
    /// One suggestion per unmet requirement
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

/// Aggregated compliance picture across every checked framework
///
/// # Example
///
/// ```
/// use esg_domain::{ComplianceResult, ComplianceStatus, ComplianceSummary};
///
/// let summary = ComplianceSummary::from_results(vec![
///     ComplianceResult {
///         framework: "GRI".to_string(),
///         status: ComplianceStatus::Compliant,
///         score: 100.0,
///         total_requirements: 4,
///         met_requirements: 4,
///         missing_requirements: vec![],
///         recommendations: vec![],
///     },
///     ComplianceResult {
///         framework: "TCFD".to_string(),
///         status: ComplianceStatus::NonCompliant,
///         score: 0.0,
///         total_requirements: 4,
///         met_requirements: 0,
///         missing_requirements: vec![],
///         recommendations: vec![],
///     },
/// ]);
///
/// assert_eq!(summary.overall_score, 50.0);
/// assert_eq!(summary.status, ComplianceStatus::PartiallyCompliant);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceSummary {
    /// Per-framework outcomes, in the order the frameworks were checked
    pub frameworks: Vec<ComplianceResult>,
    pub total_requirements: usize,
    pub met_requirements: usize,
    /// Credits met across all frameworks as a fraction of all credits
    pub overall_score: f64,
    pub status: ComplianceStatus,
    /// All framework recommendations, concatenated in framework order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

impl ComplianceSummary {
    /// Roll individual framework results up into one summary.
    ///
    /// With no results at all the summary scores zero and reads
    /// non-compliant.
    pub fn from_results(frameworks: Vec<ComplianceResult>) -> Self {
        let total_requirements: usize = frameworks.iter().map(|r| r.total_requirements).sum();
        let met_requirements: usize = frameworks.iter().map(|r| r.met_requirements).sum();
        let overall_score = if total_requirements == 0 {
            0.0
        } else {
            met_requirements as f64 / total_requirements as f64 * 100.0
        };
        let recommendations = frameworks
            .iter()
            .flat_map(|r| r.recommendations.iter().cloned())
            .collect();
        Self {
            frameworks,
            total_requirements,
            met_requirements,
            overall_score,
            status: ComplianceStatus::from_score(overall_score),
            recommendations,
        }
    }

    pub fn framework(&self, name: &str) -> Option<&ComplianceResult> {
        self.frameworks.iter().find(|r| r.framework == name)
    }
}
