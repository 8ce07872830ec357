//! The aggregated analysis report

use super::weights::ScoreWeights;
use crate::compliance::entities::ComplianceSummary;
use crate::insight::value_objects::CategoryInsight;
use crate::validation::result::ValidationResult;
use serde::{Deserialize, Serialize};

/// Everything a full analysis produced for one record (Value Object)
///
/// Built once, after every branch has finished, by
/// [`AnalysisReport::aggregate`]. Insight and recommendation lists keep
/// their branch order (environmental, social, governance, compliance,
/// validation) and are not deduplicated; repeated advice is a signal in
/// itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Weighted combination of the three category scores
    pub overall_score: f64,
    pub environmental: CategoryInsight,
    pub social: CategoryInsight,
    pub governance: CategoryInsight,
    pub compliance: ComplianceSummary,
    pub validation: ValidationResult,
    /// All category insights, concatenated in canonical order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub insights: Vec<String>,
    /// All recommendations from every branch, in canonical order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

impl AnalysisReport {
    /// Combine branch results into the final report
    pub fn aggregate(
        weights: &ScoreWeights,
        environmental: CategoryInsight,
        social: CategoryInsight,
        governance: CategoryInsight,
        compliance: ComplianceSummary,
        validation: ValidationResult,
    ) -> Self {
        let overall_score = weights.overall(environmental.score, social.score, governance.score);

        let insights = [&environmental, &social, &governance]
            .into_iter()
            .flat_map(|insight| insight.insights.iter().cloned())
            .collect();

        let recommendations = [&environmental, &social, &governance]
            .into_iter()
            .flat_map(|insight| insight.recommendations.iter().cloned())
            .chain(compliance.recommendations.iter().cloned())
            .chain(validation.recommendations.iter().cloned())
            .collect();

        Self {
            overall_score,
            environmental,
            social,
            governance,
            compliance,
            validation,
            insights,
            recommendations,
        }
    }
}
