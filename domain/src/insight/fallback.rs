//! Heuristic category scoring used when the classifier is unavailable

use super::value_objects::CategoryInsight;
use crate::core::record::{EsgCategory, EsgRecord};
use crate::validation::schema::ExpectedSchema;

/// Score granted for merely submitting data for a category
const BASE_SCORE: f64 = 40.0;

/// Additional score available through disclosure coverage
const COVERAGE_SPAN: f64 = 60.0;

/// Confidence reported for heuristic results. Deliberately low so that
/// downstream consumers can tell heuristic scores from classifier ones.
const FALLBACK_CONFIDENCE: f64 = 40.0;

/// Deterministic coverage-based scorer
///
/// Stands in for the insight classifier when a call times out or the
/// backend is down. The score depends only on which expected fields the
/// record discloses, so a degraded run is still reproducible.
#[derive(Debug, Clone)]
pub struct FallbackScorer {
    schema: ExpectedSchema,
}

impl Default for FallbackScorer {
    fn default() -> Self {
        Self {
            schema: ExpectedSchema::standard(),
        }
    }
}

impl FallbackScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(schema: ExpectedSchema) -> Self {
        Self { schema }
    }

    /// Score one category of a record by disclosure coverage
    pub fn score(&self, category: EsgCategory, record: &EsgRecord) -> CategoryInsight {
        let expected = self.schema.fields(category);
        let present: Vec<&str> = expected
            .iter()
            .filter(|spec| record.has_field(category, &spec.name))
            .map(|spec| spec.name.as_str())
            .collect();

        let coverage = if expected.is_empty() {
            1.0
        } else {
            present.len() as f64 / expected.len() as f64
        };
        let mut insight = CategoryInsight::new(
            BASE_SCORE + COVERAGE_SPAN * coverage,
            FALLBACK_CONFIDENCE,
        )
        .with_insight(format!(
            "Heuristic assessment: {} of {} expected {} disclosures present",
            present.len(),
            expected.len(),
            category.as_str()
        ));

        for spec in expected {
            if !record.has_field(category, &spec.name) {
                insight = insight.with_recommendation(format!(
                    "Disclose {} to strengthen {} reporting",
                    spec.name,
                    category.as_str()
                ));
            }
        }
        insight
    }
}
