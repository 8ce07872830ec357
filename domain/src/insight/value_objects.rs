//! Category insight value objects

use serde::{Deserialize, Serialize};

/// What the classifier (or the heuristic fallback) concluded about one
/// ESG category (Value Object)
///
/// Scores and confidence live on a 0 to 100 scale and are clamped on
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInsight {
    /// Category performance score
    pub score: f64,
    /// Qualitative observations about the category
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub insights: Vec<String>,
    /// Suggested improvements for the category
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
    /// How much trust to place in the score
    pub confidence: f64,
}

impl CategoryInsight {
    pub fn new(score: f64, confidence: f64) -> Self {
        Self {
            score: score.clamp(0.0, 100.0),
            insights: Vec::new(),
            recommendations: Vec::new(),
            confidence: confidence.clamp(0.0, 100.0),
        }
    }

    pub fn with_insight(mut self, insight: impl Into<String>) -> Self {
        self.insights.push(insight.into());
        self
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendations.push(recommendation.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_scores() {
        let insight = CategoryInsight::new(140.0, -10.0);
        assert_eq!(insight.score, 100.0);
        assert_eq!(insight.confidence, 0.0);
    }

    #[test]
    fn test_builders_accumulate() {
        let insight = CategoryInsight::new(72.0, 85.0)
            .with_insight("Emissions trend downward")
            .with_insight("Renewable share above sector median")
            .with_recommendation("Expand water usage reporting");

        assert_eq!(insight.insights.len(), 2);
        assert_eq!(insight.recommendations.len(), 1);
    }

    #[test]
    fn test_serialization_skips_empty_lists() {
        let json = serde_json::to_string(&CategoryInsight::new(50.0, 50.0)).unwrap();
        assert!(!json.contains("insights"));
        assert!(!json.contains("recommendations"));
    }
}
