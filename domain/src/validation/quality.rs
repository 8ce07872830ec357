//! Data-quality dimensions and their weighting

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Weights must sum to 1 within this tolerance
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// The four dimensions a record is scored on
///
/// The declaration order is the canonical order used to break ties when
/// looking for the weakest dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityDimension {
    Completeness,
    Accuracy,
    Consistency,
    Timeliness,
}

impl QualityDimension {
    pub fn as_str(&self) -> &str {
        match self {
            QualityDimension::Completeness => "completeness",
            QualityDimension::Accuracy => "accuracy",
            QualityDimension::Consistency => "consistency",
            QualityDimension::Timeliness => "timeliness",
        }
    }

    pub fn all() -> [QualityDimension; 4] {
        [
            QualityDimension::Completeness,
            QualityDimension::Accuracy,
            QualityDimension::Consistency,
            QualityDimension::Timeliness,
        ]
    }
}

impl std::fmt::Display for QualityDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-dimension quality scores on a 0 to 100 scale (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataQuality {
    pub completeness: f64,
    pub accuracy: f64,
    pub consistency: f64,
    pub timeliness: f64,
}

impl DataQuality {
    /// Build a quality profile, clamping every dimension into 0..=100
    pub fn new(completeness: f64, accuracy: f64, consistency: f64, timeliness: f64) -> Self {
        Self {
            completeness: completeness.clamp(0.0, 100.0),
            accuracy: accuracy.clamp(0.0, 100.0),
            consistency: consistency.clamp(0.0, 100.0),
            timeliness: timeliness.clamp(0.0, 100.0),
        }
    }

    /// A profile scoring full marks everywhere
    pub fn perfect() -> Self {
        Self::new(100.0, 100.0, 100.0, 100.0)
    }

    pub fn dimension(&self, dimension: QualityDimension) -> f64 {
        match dimension {
            QualityDimension::Completeness => self.completeness,
            QualityDimension::Accuracy => self.accuracy,
            QualityDimension::Consistency => self.consistency,
            QualityDimension::Timeliness => self.timeliness,
        }
    }

    /// The dimension with the lowest score, ties broken in canonical order
    pub fn weakest_dimension(&self) -> QualityDimension {
        let mut weakest = QualityDimension::Completeness;
        for candidate in QualityDimension::all() {
            if self.dimension(candidate) < self.dimension(weakest) {
                weakest = candidate;
            }
        }
        weakest
    }
}

impl Default for DataQuality {
    fn default() -> Self {
        Self::perfect()
    }
}

/// How much each quality dimension contributes to the validation score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityWeights {
    pub completeness: f64,
    pub accuracy: f64,
    pub consistency: f64,
    pub timeliness: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            completeness: 0.25,
            accuracy: 0.25,
            consistency: 0.25,
            timeliness: 0.25,
        }
    }
}

impl QualityWeights {
    /// Check that all weights are non-negative and sum to 1
    pub fn validate(&self) -> Result<(), DomainError> {
        let weights = [
            self.completeness,
            self.accuracy,
            self.consistency,
            self.timeliness,
        ];
        if weights.iter().any(|w| *w < 0.0) {
            return Err(DomainError::InvalidWeights(
                "quality weights must be non-negative".to_string(),
            ));
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(DomainError::InvalidWeights(format!(
                "quality weights sum to {sum}, expected 1.0"
            )));
        }
        Ok(())
    }

    /// Weighted combination of the four dimension scores
    pub fn weighted_score(&self, quality: &DataQuality) -> f64 {
        quality.completeness * self.completeness
            + quality.accuracy * self.accuracy
            + quality.consistency * self.consistency
            + quality.timeliness * self.timeliness
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps() {
        let quality = DataQuality::new(120.0, -5.0, 50.0, 100.0);
        assert_eq!(quality.completeness, 100.0);
        assert_eq!(quality.accuracy, 0.0);
        assert_eq!(quality.consistency, 50.0);
    }

    #[test]
    fn test_weakest_dimension() {
        let quality = DataQuality::new(80.0, 60.0, 90.0, 70.0);
        assert_eq!(quality.weakest_dimension(), QualityDimension::Accuracy);
    }

    #[test]
    fn test_weakest_dimension_tie_uses_canonical_order() {
        let quality = DataQuality::new(50.0, 50.0, 90.0, 50.0);
        assert_eq!(quality.weakest_dimension(), QualityDimension::Completeness);
    }

    #[test]
    fn test_default_weights_are_balanced() {
        let weights = QualityWeights::default();
        assert!(weights.validate().is_ok());
        assert_eq!(weights.weighted_score(&DataQuality::perfect()), 100.0);
    }

    #[test]
    fn test_weighted_score() {
        let weights = QualityWeights {
            completeness: 0.5,
            accuracy: 0.5,
            consistency: 0.0,
            timeliness: 0.0,
        };
        let quality = DataQuality::new(80.0, 40.0, 0.0, 0.0);
        assert_eq!(weights.weighted_score(&quality), 60.0);
    }

    #[test]
    fn test_validate_rejects_bad_sums() {
        let weights = QualityWeights {
            completeness: 0.5,
            accuracy: 0.5,
            consistency: 0.5,
            timeliness: 0.0,
        };
        assert!(weights.validate().is_err());

        let negative = QualityWeights {
            completeness: -0.25,
            accuracy: 0.5,
            consistency: 0.5,
            timeliness: 0.25,
        };
        assert!(negative.validate().is_err());
    }
}
