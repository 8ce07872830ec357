//! Category weighting for the overall ESG score

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENVIRONMENTAL_WEIGHT: f64 = 0.40;
pub const DEFAULT_SOCIAL_WEIGHT: f64 = 0.35;
pub const DEFAULT_GOVERNANCE_WEIGHT: f64 = 0.25;

/// Weights must sum to 1 within this tolerance
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// How much each category contributes to the overall score
///
/// # Example
///
/// ```
/// use esg_domain::ScoreWeights;
///
/// let weights = ScoreWeights::default();
/// assert!(weights.validate().is_ok());
/// assert_eq!(weights.overall(100.0, 100.0, 100.0), 100.0);
/// assert_eq!(weights.overall(50.0, 80.0, 60.0), 63.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub environmental: f64,
    pub social: f64,
    pub governance: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            environmental: DEFAULT_ENVIRONMENTAL_WEIGHT,
            social: DEFAULT_SOCIAL_WEIGHT,
            governance: DEFAULT_GOVERNANCE_WEIGHT,
        }
    }
}

impl ScoreWeights {
    pub fn new(environmental: f64, social: f64, governance: f64) -> Self {
        Self {
            environmental,
            social,
            governance,
        }
    }

    /// Check that all weights are non-negative and sum to 1
    pub fn validate(&self) -> Result<(), DomainError> {
        let weights = [self.environmental, self.social, self.governance];
        if weights.iter().any(|w| *w < 0.0) {
            return Err(DomainError::InvalidWeights(
                "category weights must be non-negative".to_string(),
            ));
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(DomainError::InvalidWeights(format!(
                "category weights sum to {sum}, expected 1.0"
            )));
        }
        Ok(())
    }

    /// Weighted overall score from the three category scores, clamped
    /// into 0..=100
    pub fn overall(&self, environmental: f64, social: f64, governance: f64) -> f64 {
        (environmental * self.environmental
            + social * self.social
            + governance * self.governance)
            .clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_follow_e_s_g_split() {
        let weights = ScoreWeights::default();
        assert_eq!(weights.environmental, 0.40);
        assert_eq!(weights.social, 0.35);
        assert_eq!(weights.governance, 0.25);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_overall_is_weighted_sum() {
        let weights = ScoreWeights::default();
        // 50*0.40 + 80*0.35 + 60*0.25 = 20 + 28 + 15
        assert_eq!(weights.overall(50.0, 80.0, 60.0), 63.0);
    }

    #[test]
    fn test_overall_clamps() {
        let weights = ScoreWeights::new(1.0, 0.0, 0.0);
        assert_eq!(weights.overall(150.0, 0.0, 0.0), 100.0);
    }

    #[test]
    fn test_validate_rejects_bad_sums() {
        assert!(ScoreWeights::new(0.5, 0.5, 0.5).validate().is_err());
        assert!(ScoreWeights::new(-0.2, 0.7, 0.5).validate().is_err());
        assert!(ScoreWeights::new(0.3, 0.3, 0.4).validate().is_ok());
    }
}
