//! `[validation]` section: thresholds for the validation engine

use esg_domain::{QualityWeights, SeverityPenalties, ValidationConfig};
use serde::{Deserialize, Serialize};

/// Raw validation thresholds from the configuration file
///
/// Mirrors [`ValidationConfig`] field for field. The nested
/// `quality_weights` and `severity_penalties` tables must be given in
/// full when overridden; all top-level knobs default individually.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileValidationConfig {
    pub z_threshold: f64,
    pub z_medium: f64,
    pub z_high: f64,
    pub iqr_multiplier: f64,
    pub pass_threshold: f64,
    pub fresh_days: i64,
    pub stale_days: i64,
    pub placeholder_values: Vec<f64>,
    pub duplicate_field_min: usize,
    pub quality_weights: QualityWeights,
    pub severity_penalties: SeverityPenalties,
}

impl Default for FileValidationConfig {
    fn default() -> Self {
        let config = ValidationConfig::default();
        Self {
            z_threshold: config.z_threshold,
            z_medium: config.z_medium,
            z_high: config.z_high,
            iqr_multiplier: config.iqr_multiplier,
            pass_threshold: config.pass_threshold,
            fresh_days: config.fresh_days,
            stale_days: config.stale_days,
            placeholder_values: config.placeholder_values,
            duplicate_field_min: config.duplicate_field_min,
            quality_weights: config.quality_weights,
            severity_penalties: config.severity_penalties,
        }
    }
}

impl FileValidationConfig {
    /// Convert to the domain configuration; the caller validates
    pub fn to_validation_config(&self) -> ValidationConfig {
        ValidationConfig {
            z_threshold: self.z_threshold,
            z_medium: self.z_medium,
            z_high: self.z_high,
            iqr_multiplier: self.iqr_multiplier,
            pass_threshold: self.pass_threshold,
            fresh_days: self.fresh_days,
            stale_days: self.stale_days,
            placeholder_values: self.placeholder_values.clone(),
            duplicate_field_min: self.duplicate_field_min,
            quality_weights: self.quality_weights,
            severity_penalties: self.severity_penalties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_to_domain_default() {
        let config = FileValidationConfig::default().to_validation_config();
        assert_eq!(config, ValidationConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config: FileValidationConfig = toml::from_str(
            r#"
            pass_threshold = 60.0
            fresh_days = 7
            "#,
        )
        .unwrap();
        let domain = config.to_validation_config();
        assert!((domain.pass_threshold - 60.0).abs() < f64::EPSILON);
        assert_eq!(domain.fresh_days, 7);
        assert!((domain.z_threshold - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_nested_tables_parse() {
        let config: FileValidationConfig = toml::from_str(
            r#"
            [quality_weights]
            completeness = 0.4
            accuracy = 0.3
            consistency = 0.2
            timeliness = 0.1

            [severity_penalties]
            low = 1.0
            medium = 3.0
            high = 8.0
            "#,
        )
        .unwrap();
        let domain = config.to_validation_config();
        assert!(domain.validate().is_ok());
        assert!((domain.severity_penalties.high - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_inverted_z_ladder_fails_domain_validation() {
        let config: FileValidationConfig = toml::from_str(
            r#"
            z_threshold = 4.0
            z_medium = 3.0
            z_high = 2.0
            "#,
        )
        .unwrap();
        assert!(config.to_validation_config().validate().is_err());
    }
}
