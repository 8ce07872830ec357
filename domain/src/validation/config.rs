//! Tunable thresholds for the validation engine

use super::anomaly::AnomalySeverity;
use super::quality::QualityWeights;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Score deducted per anomaly, by severity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityPenalties {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for SeverityPenalties {
    fn default() -> Self {
        Self {
            low: 2.0,
            medium: 5.0,
            high: 10.0,
        }
    }
}

impl SeverityPenalties {
    pub fn for_severity(&self, severity: AnomalySeverity) -> f64 {
        match severity {
            AnomalySeverity::Low => self.low,
            AnomalySeverity::Medium => self.medium,
            AnomalySeverity::High => self.high,
        }
    }
}

/// All thresholds the validation engine works with
///
/// Every knob has a documented default so that `ValidationConfig::default()`
/// is a complete, usable configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Absolute z-score above which a value is flagged as an outlier
    pub z_threshold: f64,
    /// Absolute z-score from which an outlier is at least medium severity
    pub z_medium: f64,
    /// Absolute z-score above which an outlier is high severity
    pub z_high: f64,
    /// Fence multiplier for the IQR fallback test
    pub iqr_multiplier: f64,
    /// Validation score a record must reach to pass
    pub pass_threshold: f64,
    /// Data at most this many days old scores full timeliness
    pub fresh_days: i64,
    /// Data at least this many days old scores zero timeliness
    pub stale_days: i64,
    /// Numeric values treated as placeholder data
    pub placeholder_values: Vec<f64>,
    /// Identical non-zero value must appear in at least this many fields
    /// to count as a duplication pattern
    pub duplicate_field_min: usize,
    /// Contribution of each quality dimension to the score
    pub quality_weights: QualityWeights,
    /// Deduction per anomaly by severity
    pub severity_penalties: SeverityPenalties,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            z_threshold: 2.5,
            z_medium: 3.0,
            z_high: 4.0,
            iqr_multiplier: 1.5,
            pass_threshold: 50.0,
            fresh_days: 30,
            stale_days: 365,
            placeholder_values: vec![999_999.0, 99_999.0, 11_111.0, 123_456.0, 123_456_789.0],
            duplicate_field_min: 3,
            quality_weights: QualityWeights::default(),
            severity_penalties: SeverityPenalties::default(),
        }
    }
}

impl ValidationConfig {
    pub fn with_z_threshold(mut self, threshold: f64) -> Self {
        self.z_threshold = threshold;
        self
    }

    pub fn with_pass_threshold(mut self, threshold: f64) -> Self {
        self.pass_threshold = threshold;
        self
    }

    pub fn with_quality_weights(mut self, weights: QualityWeights) -> Self {
        self.quality_weights = weights;
        self
    }

    /// Check the configuration is internally coherent
    pub fn validate(&self) -> Result<(), DomainError> {
        self.quality_weights.validate()?;
        if self.z_threshold <= 0.0 {
            return Err(DomainError::InvalidConfig(
                "z_threshold must be positive".to_string(),
            ));
        }
        if self.z_medium > self.z_high {
            return Err(DomainError::InvalidConfig(format!(
                "z_medium ({}) must not exceed z_high ({})",
                self.z_medium, self.z_high
            )));
        }
        if self.iqr_multiplier <= 0.0 {
            return Err(DomainError::InvalidConfig(
                "iqr_multiplier must be positive".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.pass_threshold) {
            return Err(DomainError::InvalidConfig(format!(
                "pass_threshold {} outside 0..=100",
                self.pass_threshold
            )));
        }
        if self.fresh_days >= self.stale_days {
            return Err(DomainError::InvalidConfig(format!(
                "fresh_days ({}) must be below stale_days ({})",
                self.fresh_days, self.stale_days
            )));
        }
        if self.duplicate_field_min < 2 {
            return Err(DomainError::InvalidConfig(
                "duplicate_field_min must be at least 2".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ValidationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_severity_penalties() {
        let penalties = SeverityPenalties::default();
        assert_eq!(penalties.for_severity(AnomalySeverity::Low), 2.0);
        assert_eq!(penalties.for_severity(AnomalySeverity::Medium), 5.0);
        assert_eq!(penalties.for_severity(AnomalySeverity::High), 10.0);
    }

    #[test]
    fn test_validate_rejects_inverted_freshness_window() {
        let config = ValidationConfig {
            fresh_days: 400,
            stale_days: 365,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_z_bands() {
        let config = ValidationConfig {
            z_medium: 5.0,
            z_high: 4.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ValidationConfig::default().with_z_threshold(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_pass_threshold() {
        let config = ValidationConfig::default().with_pass_threshold(150.0);
        assert!(config.validate().is_err());
    }
}
