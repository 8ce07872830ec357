//! `[scoring]` section: category weights for the composite score

use esg_domain::ScoreWeights;
use serde::{Deserialize, Serialize};

/// Raw category weights from the configuration file
///
/// Defaults mirror the domain's weighting. The weights are not
/// normalized here; a set that does not sum to 1.0 is rejected during
/// validation rather than silently rescaled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileScoringConfig {
    pub environmental_weight: f64,
    pub social_weight: f64,
    pub governance_weight: f64,
}

impl Default for FileScoringConfig {
    fn default() -> Self {
        let weights = ScoreWeights::default();
        Self {
            environmental_weight: weights.environmental,
            social_weight: weights.social,
            governance_weight: weights.governance,
        }
    }
}

impl FileScoringConfig {
    /// Convert to domain weights; the caller validates the result
    pub fn to_score_weights(&self) -> ScoreWeights {
        ScoreWeights::new(
            self.environmental_weight,
            self.social_weight,
            self.governance_weight,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_domain_weights() {
        let weights = FileScoringConfig::default().to_score_weights();
        assert!(weights.validate().is_ok());
        assert!((weights.environmental - 0.40).abs() < f64::EPSILON);
        assert!((weights.social - 0.35).abs() < f64::EPSILON);
        assert!((weights.governance - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overridden_weights_parse() {
        let config: FileScoringConfig = toml::from_str(
            r#"
            environmental_weight = 0.5
            social_weight = 0.25
            governance_weight = 0.25
            "#,
        )
        .unwrap();
        assert!(config.to_score_weights().validate().is_ok());
    }

    #[test]
    fn test_unbalanced_weights_fail_domain_validation() {
        let config: FileScoringConfig = toml::from_str(
            r#"
            environmental_weight = 0.7
            "#,
        )
        .unwrap();
        // 0.7 + 0.35 + 0.25 does not sum to 1.0
        assert!(config.to_score_weights().validate().is_err());
    }
}
