//! Deterministic in-process classifier

use async_trait::async_trait;
use esg_application::{ClassifierError, InsightClassifier};
use esg_domain::{CategoryInsight, EsgCategory, EsgRecord, ExpectedSchema, FallbackScorer};

/// Classifier for network-free deployments
///
/// Wraps the heuristic fallback scorer behind the classifier port, so
/// a deployment without a scoring service still produces insights,
/// with the honestly low confidence the heuristic reports.
pub struct LocalInsightClassifier {
    scorer: FallbackScorer,
}

impl LocalInsightClassifier {
    pub fn new() -> Self {
        Self {
            scorer: FallbackScorer::new(),
        }
    }

    /// Score against a custom field schema instead of the standard one
    pub fn with_schema(schema: ExpectedSchema) -> Self {
        Self {
            scorer: FallbackScorer::with_schema(schema),
        }
    }
}

impl Default for LocalInsightClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InsightClassifier for LocalInsightClassifier {
    async fn classify(
        &self,
        category: EsgCategory,
        record: &EsgRecord,
    ) -> Result<CategoryInsight, ClassifierError> {
        Ok(self.scorer.score(category, record))
    }

    fn name(&self) -> &str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> EsgRecord {
        EsgRecord::new()
            .with_field(EsgCategory::Environmental, "emissions", 125_000.0)
            .with_field(EsgCategory::Environmental, "energy_consumption", 40_000.0)
    }

    #[tokio::test]
    async fn test_classify_never_fails() {
        let classifier = LocalInsightClassifier::new();
        let insight = classifier
            .classify(EsgCategory::Environmental, &sample_record())
            .await
            .unwrap();
        assert!(insight.score > 0.0);
        assert!(!insight.insights.is_empty());
    }

    #[tokio::test]
    async fn test_classify_is_deterministic() {
        let classifier = LocalInsightClassifier::new();
        let record = sample_record();
        let first = classifier
            .classify(EsgCategory::Environmental, &record)
            .await
            .unwrap();
        let second = classifier
            .classify(EsgCategory::Environmental, &record)
            .await
            .unwrap();
        assert_eq!(first.score, second.score);
        assert_eq!(first.insights, second.insights);
    }

    #[tokio::test]
    async fn test_empty_category_scores_low() {
        let classifier = LocalInsightClassifier::new();
        let insight = classifier
            .classify(EsgCategory::Governance, &sample_record())
            .await
            .unwrap();
        // no governance fields reported, only the base score remains
        assert!((insight.score - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_name() {
        assert_eq!(LocalInsightClassifier::new().name(), "local");
    }
}
