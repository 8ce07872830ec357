//! The validation engine
//!
//! Checks one record for missing disclosures, range violations,
//! statistical outliers and suspicious patterns, then condenses the
//! findings into a quality profile and a single score.
//!
//! The engine is pure and synchronous. For a given record, schema,
//! configuration and reference table the outcome is identical on every
//! run; wall-clock time enters only through the `as_of` date, which
//! [`ValidationEngine::validate`] pins to today and
//! [`ValidationEngine::validate_at`] takes explicitly.

use chrono::NaiveDate;
use std::sync::Arc;

use super::anomaly::{AnomalyKind, AnomalySeverity, DataAnomaly};
use super::config::ValidationConfig;
use super::quality::{DataQuality, QualityDimension};
use super::result::ValidationResult;
use super::schema::{ExpectedSchema, FieldKind};
use super::stats::{self, ReferenceTable};
use crate::core::error::DomainError;
use crate::core::record::EsgRecord;

/// Quality dimensions below this level earn a targeted recommendation
const RECOMMEND_BELOW: f64 = 90.0;

/// Timeliness score used when the record declares no reporting period
const NEUTRAL_TIMELINESS: f64 = 50.0;

/// Validates ESG records against a schema, thresholds and optional
/// reference distributions
///
/// # Example
///
/// ```
/// use esg_domain::{EsgCategory, EsgRecord, ValidationEngine};
///
/// let engine = ValidationEngine::default();
/// let record = EsgRecord::new()
///     .with_field(EsgCategory::Social, "turnover_rate", 150.0);
///
/// let result = engine.validate(&record).unwrap();
/// assert!(!result.is_valid);
/// assert_eq!(result.errors.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    config: ValidationConfig,
    schema: ExpectedSchema,
    reference: Option<Arc<ReferenceTable>>,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self {
            config: ValidationConfig::default(),
            schema: ExpectedSchema::standard(),
            reference: None,
        }
    }
}

impl ValidationEngine {
    /// Create an engine with the standard schema and the given thresholds
    pub fn new(config: ValidationConfig) -> Result<Self, DomainError> {
        config.validate()?;
        Ok(Self {
            config,
            schema: ExpectedSchema::standard(),
            reference: None,
        })
    }

    pub fn with_schema(mut self, schema: ExpectedSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_reference(mut self, reference: Arc<ReferenceTable>) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn schema(&self) -> &ExpectedSchema {
        &self.schema
    }

    /// Validate a record as of today
    pub fn validate(&self, record: &EsgRecord) -> Result<ValidationResult, DomainError> {
        self.validate_at(record, chrono::Utc::now().date_naive())
    }

    /// Validate a record against an explicit reference date.
    ///
    /// This is the deterministic core: `as_of` is the only place time
    /// enters the computation.
    pub fn validate_at(
        &self,
        record: &EsgRecord,
        as_of: NaiveDate,
    ) -> Result<ValidationResult, DomainError> {
        if record.is_empty() {
            return Err(DomainError::EmptyRecord);
        }
        if let Some(field) = record.first_non_finite() {
            return Err(DomainError::NonFiniteValue(field));
        }

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut anomalies = Vec::new();

        let (present, expected) = self.detect_missing(record, &mut anomalies);
        self.check_ranges(record, &mut errors, &mut warnings);

        let numeric = record.numeric_fields();
        self.detect_outliers(&numeric, &mut anomalies);
        self.detect_patterns(&numeric, &mut anomalies);

        let field_count = record.field_count() as f64;
        let completeness = if expected == 0 {
            100.0
        } else {
            present as f64 / expected as f64 * 100.0
        };
        let accuracy = (1.0 - errors.len() as f64 / field_count) * 100.0;
        let inconsistencies = anomalies
            .iter()
            .filter(|a| matches!(a.kind, AnomalyKind::Inconsistent | AnomalyKind::Suspicious))
            .count();
        let consistency = (1.0 - inconsistencies as f64 / field_count) * 100.0;
        let (timeliness, timeliness_warning) = self.timeliness_score(record, as_of);
        if let Some(warning) = timeliness_warning {
            warnings.push(warning);
        }

        let quality = DataQuality::new(completeness, accuracy, consistency, timeliness);
        let penalty: f64 = anomalies
            .iter()
            .map(|a| self.config.severity_penalties.for_severity(a.severity))
            .sum();
        let score = (self.config.quality_weights.weighted_score(&quality) - penalty).clamp(0.0, 100.0);
        let is_valid = errors.is_empty() && score >= self.config.pass_threshold;
        let recommendations = self.build_recommendations(&quality, &anomalies);

        Ok(ValidationResult {
            is_valid,
            score,
            errors,
            warnings,
            anomalies,
            data_quality: quality,
            recommendations,
        })
    }

    /// Compare the record against the expected schema, one Missing anomaly
    /// per absent field. Returns `(present, expected)` counts.
    fn detect_missing(&self, record: &EsgRecord, anomalies: &mut Vec<DataAnomaly>) -> (usize, usize) {
        let mut present = 0;
        let mut expected = 0;
        for (category, spec) in self.schema.iter() {
            expected += 1;
            if record.has_field(category, &spec.name) {
                present += 1;
            } else {
                anomalies.push(DataAnomaly::missing(format!(
                    "{}.{}",
                    category.as_str(),
                    spec.name
                )));
            }
        }
        (present, expected)
    }

    /// Hard range violations go to `errors`, plausibility overruns to
    /// `warnings`. Fields without a schema entry are left alone.
    fn check_ranges(&self, record: &EsgRecord, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
        for (category, name, value) in record.fields() {
            let Some(spec) = self.schema.spec_for(category, name) else {
                continue;
            };
            let qualified = format!("{}.{}", category.as_str(), name);
            let Some(number) = value.as_number() else {
                if spec.hard_range().is_some() {
                    errors.push(format!("Field {qualified} expects a numeric value"));
                }
                continue;
            };
            match spec.kind {
                FieldKind::Percentage if !(0.0..=100.0).contains(&number) => {
                    errors.push(format!(
                        "Field {qualified} is {number}, outside the valid percentage range 0 to 100"
                    ));
                }
                FieldKind::Quantity if number < 0.0 => {
                    errors.push(format!(
                        "Field {qualified} is {number}, negative quantities are not valid"
                    ));
                }
                _ => {
                    if let Some(limit) = spec.warn_above
                        && number > limit
                    {
                        warnings.push(format!(
                            "Field {qualified} is {number}, above the plausibility limit of {limit}"
                        ));
                    }
                }
            }
        }
    }

    /// Fields with a reference distribution get a z-test; the rest fall
    /// back to an IQR test over the record's own numeric values.
    fn detect_outliers(&self, numeric: &[(String, f64)], anomalies: &mut Vec<DataAnomaly>) {
        let mut unreferenced = Vec::new();
        for (index, (field, value)) in numeric.iter().enumerate() {
            let baseline = self.reference.as_ref().and_then(|table| table.get(field));
            let Some((baseline, z)) = baseline.and_then(|b| b.z_score(*value).map(|z| (b, z)))
            else {
                unreferenced.push(index);
                continue;
            };
            if z.abs() > self.config.z_threshold {
                let (low, high) = baseline.band(self.config.z_threshold);
                anomalies.push(
                    DataAnomaly::new(
                        AnomalyKind::Outlier,
                        field.clone(),
                        self.z_severity(z.abs()),
                        format!(
                            "z-score {:.2} against a baseline mean of {:.1}",
                            z, baseline.mean
                        ),
                    )
                    .with_observed(*value)
                    .with_expected_range(low, high),
                );
            }
        }

        if unreferenced.is_empty() {
            return;
        }
        let values: Vec<f64> = numeric.iter().map(|(_, v)| *v).collect();
        let Some((q1, q3)) = stats::quartiles(&values) else {
            return;
        };
        let iqr = q3 - q1;
        if iqr <= 0.0 {
            return;
        }
        let low_fence = q1 - self.config.iqr_multiplier * iqr;
        let high_fence = q3 + self.config.iqr_multiplier * iqr;
        for index in unreferenced {
            let (field, value) = &numeric[index];
            let distance = if *value < low_fence {
                low_fence - value
            } else if *value > high_fence {
                value - high_fence
            } else {
                continue;
            };
            let widths = distance / iqr;
            anomalies.push(
                DataAnomaly::new(
                    AnomalyKind::Outlier,
                    field.clone(),
                    self.iqr_severity(widths),
                    format!("Outside the interquartile fences by {widths:.1} IQR widths"),
                )
                .with_observed(*value)
                .with_expected_range(low_fence, high_fence),
            );
        }
    }

    fn z_severity(&self, z_abs: f64) -> AnomalySeverity {
        if z_abs > self.config.z_high {
            AnomalySeverity::High
        } else if z_abs >= self.config.z_medium {
            AnomalySeverity::Medium
        } else {
            AnomalySeverity::Low
        }
    }

    fn iqr_severity(&self, fence_widths: f64) -> AnomalySeverity {
        if fence_widths > 3.0 {
            AnomalySeverity::High
        } else if fence_widths >= 1.0 {
            AnomalySeverity::Medium
        } else {
            AnomalySeverity::Low
        }
    }

    /// Placeholder values and identical values repeated across fields.
    /// Zero repeats legitimately and is never treated as a duplicate.
    fn detect_patterns(&self, numeric: &[(String, f64)], anomalies: &mut Vec<DataAnomaly>) {
        for (field, value) in numeric {
            if self.config.placeholder_values.contains(value) {
                anomalies.push(
                    DataAnomaly::new(
                        AnomalyKind::Suspicious,
                        field.clone(),
                        AnomalySeverity::Medium,
                        format!("Value {value} matches a known placeholder"),
                    )
                    .with_observed(*value),
                );
            }
        }

        let mut groups: Vec<(f64, Vec<&str>)> = Vec::new();
        for (field, value) in numeric {
            if *value == 0.0 {
                continue;
            }
            match groups.iter_mut().find(|(v, _)| v == value) {
                Some((_, fields)) => fields.push(field),
                None => groups.push((*value, vec![field.as_str()])),
            }
        }
        for (value, fields) in groups {
            if fields.len() < self.config.duplicate_field_min {
                continue;
            }
            let listed = fields.join(", ");
            anomalies.push(
                DataAnomaly::new(
                    AnomalyKind::Inconsistent,
                    fields[0].to_string(),
                    AnomalySeverity::Low,
                    format!("Value {value} repeats across {} fields: {listed}", fields.len()),
                )
                .with_observed(value),
            );
        }
    }

    fn timeliness_score(&self, record: &EsgRecord, as_of: NaiveDate) -> (f64, Option<String>) {
        let Some(period_end) = record.period_end() else {
            return (
                NEUTRAL_TIMELINESS,
                Some("No reporting period end date declared, timeliness scored neutrally".to_string()),
            );
        };
        let age_days = (as_of - period_end).num_days();
        if age_days < 0 {
            return (
                100.0,
                Some(format!("Reporting period ends in the future ({period_end})")),
            );
        }
        let fresh = self.config.fresh_days;
        let stale = self.config.stale_days;
        let score = if age_days <= fresh {
            100.0
        } else if age_days >= stale {
            0.0
        } else {
            100.0 * (stale - age_days) as f64 / (stale - fresh) as f64
        };
        (score, None)
    }

    /// One recommendation keyed off the weakest quality dimension, one off
    /// the most frequent anomaly kind. Same findings, same suggestions.
    fn build_recommendations(&self, quality: &DataQuality, anomalies: &[DataAnomaly]) -> Vec<String> {
        let mut recommendations = Vec::new();
        let weakest = quality.weakest_dimension();
        if quality.dimension(weakest) < RECOMMEND_BELOW {
            recommendations.push(
                match weakest {
                    QualityDimension::Completeness => {
                        "Disclose the missing expected fields to raise completeness"
                    }
                    QualityDimension::Accuracy => "Correct the out-of-range values flagged as errors",
                    QualityDimension::Consistency => {
                        "Review fields flagged as duplicated or placeholder data"
                    }
                    QualityDimension::Timeliness => "Submit data for a more recent reporting period",
                }
                .to_string(),
            );
        }
        if let Some(kind) = most_frequent_kind(anomalies) {
            recommendations.push(
                match kind {
                    AnomalyKind::Outlier => {
                        "Investigate statistical outliers against historical baselines"
                    }
                    AnomalyKind::Missing => "Fill in the missing disclosures before resubmitting",
                    AnomalyKind::Inconsistent => "Check values repeated across unrelated fields",
                    AnomalyKind::Suspicious => "Replace placeholder-looking values with measured data",
                }
                .to_string(),
            );
        }
        recommendations
    }
}

/// Most frequent anomaly kind, ties broken in canonical kind order
fn most_frequent_kind(anomalies: &[DataAnomaly]) -> Option<AnomalyKind> {
    let mut best: Option<(AnomalyKind, usize)> = None;
    for kind in AnomalyKind::all() {
        let count = anomalies.iter().filter(|a| a.kind == kind).count();
        if count == 0 {
            continue;
        }
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((kind, count));
        }
    }
    best.map(|(kind, _)| kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::EsgCategory;
    use crate::validation::schema::FieldSpec;
    use crate::validation::stats::ReferenceStats;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
    }

    /// A record disclosing every field of the standard schema with
    /// plausible values, dated recently
    fn full_record() -> EsgRecord {
        EsgRecord::new()
            .with_field(EsgCategory::Environmental, "emissions", 125_000.0)
            .with_field(EsgCategory::Environmental, "energy_consumption", 450_000.0)
            .with_field(EsgCategory::Environmental, "water_usage", 89_000.0)
            .with_field(EsgCategory::Environmental, "waste_generated", 12_000.0)
            .with_field(EsgCategory::Environmental, "renewable_energy_percent", 34.0)
            .with_field(EsgCategory::Social, "employee_count", 5_200.0)
            .with_field(EsgCategory::Social, "turnover_rate", 12.0)
            .with_field(EsgCategory::Social, "training_hours", 38.0)
            .with_field(EsgCategory::Social, "diversity_percent", 44.0)
            .with_field(EsgCategory::Social, "injury_rate", 2.1)
            .with_field(EsgCategory::Governance, "board_size", 11.0)
            .with_field(EsgCategory::Governance, "independent_directors_percent", 73.0)
            .with_field(EsgCategory::Governance, "board_diversity_percent", 36.0)
            .with_field(EsgCategory::Governance, "ethics_violations", 2.0)
            .with_field(EsgCategory::Governance, "audit_committee", "fully independent")
            .with_period_end(NaiveDate::from_ymd_opt(2026, 6, 15).unwrap())
    }

    /// A reference table centered on the record's own values, so every
    /// z-score is zero
    fn matching_reference(record: &EsgRecord) -> Arc<ReferenceTable> {
        let mut table = ReferenceTable::new();
        for (field, value) in record.numeric_fields() {
            table.insert(field, ReferenceStats::new(value, value.abs() * 0.1 + 1.0));
        }
        Arc::new(table)
    }

    #[test]
    fn test_clean_record_passes_with_full_score() {
        let record = full_record();
        let engine = ValidationEngine::default().with_reference(matching_reference(&record));
        let result = engine.validate_at(&record, as_of()).unwrap();

        assert!(result.is_valid);
        assert_eq!(result.score, 100.0);
        assert!(result.errors.is_empty());
        assert!(result.anomalies.is_empty());
        assert!(result.recommendations.is_empty());
        assert_eq!(result.data_quality.completeness, 100.0);
        assert_eq!(result.data_quality.timeliness, 100.0);
    }

    #[test]
    fn test_missing_fields_lower_completeness_exactly() {
        let record = EsgRecord::new()
            .with_field(EsgCategory::Environmental, "emissions", 125_000.0)
            .with_field(EsgCategory::Social, "employee_count", 5_200.0)
            .with_field(EsgCategory::Governance, "board_size", 11.0)
            .with_period_end(NaiveDate::from_ymd_opt(2026, 6, 15).unwrap());
        let engine = ValidationEngine::default();
        let result = engine.validate_at(&record, as_of()).unwrap();

        // 3 of 15 expected fields present
        assert_eq!(result.data_quality.completeness, 3.0 / 15.0 * 100.0);
        assert_eq!(result.anomalies_of_kind(AnomalyKind::Missing).count(), 12);
        for anomaly in result.anomalies_of_kind(AnomalyKind::Missing) {
            assert_eq!(anomaly.severity, AnomalySeverity::Medium);
        }
    }

    #[test]
    fn test_z_score_severity_bands() {
        let reference = Arc::new(
            ReferenceTable::new()
                .with_entry("environmental.emissions", ReferenceStats::new(100.0, 10.0)),
        );
        let engine = ValidationEngine::default()
            .with_schema(ExpectedSchema::empty())
            .with_reference(reference);

        let cases = [
            (126.0, Some(AnomalySeverity::Low)),    // z = 2.6
            (135.0, Some(AnomalySeverity::Medium)), // z = 3.5
            (142.0, Some(AnomalySeverity::High)),   // z = 4.2
            (115.0, None),                          // z = 1.5, below threshold
            (125.0, None),                          // z = 2.5, not strictly above
        ];
        for (value, expected) in cases {
            let record = EsgRecord::new()
                .with_field(EsgCategory::Environmental, "emissions", value)
                .with_period_end(as_of());
            let result = engine.validate_at(&record, as_of()).unwrap();
            let outlier = result.anomalies_of_kind(AnomalyKind::Outlier).next();
            assert_eq!(outlier.map(|a| a.severity), expected, "value {value}");
        }
    }

    #[test]
    fn test_outlier_carries_observed_and_range() {
        let reference = Arc::new(
            ReferenceTable::new()
                .with_entry("environmental.emissions", ReferenceStats::new(100.0, 10.0)),
        );
        let engine = ValidationEngine::default()
            .with_schema(ExpectedSchema::empty())
            .with_reference(reference);
        let record = EsgRecord::new()
            .with_field(EsgCategory::Environmental, "emissions", 150.0)
            .with_period_end(as_of());
        let result = engine.validate_at(&record, as_of()).unwrap();

        let outlier = result
            .anomalies_of_kind(AnomalyKind::Outlier)
            .next()
            .unwrap();
        assert_eq!(outlier.observed, Some(150.0));
        assert_eq!(outlier.expected_range, Some((75.0, 125.0)));
    }

    #[test]
    fn test_iqr_fallback_without_reference() {
        let engine = ValidationEngine::default().with_schema(ExpectedSchema::empty());
        let record = EsgRecord::new()
            .with_field(EsgCategory::Environmental, "a", 10.0)
            .with_field(EsgCategory::Environmental, "b", 12.0)
            .with_field(EsgCategory::Environmental, "c", 11.0)
            .with_field(EsgCategory::Environmental, "d", 13.0)
            .with_field(EsgCategory::Environmental, "e", 400.0)
            .with_period_end(as_of());
        let result = engine.validate_at(&record, as_of()).unwrap();

        let outliers: Vec<_> = result.anomalies_of_kind(AnomalyKind::Outlier).collect();
        assert_eq!(outliers.len(), 1);
        assert_eq!(outliers[0].field, "environmental.e");
        assert_eq!(outliers[0].severity, AnomalySeverity::High);
    }

    #[test]
    fn test_iqr_skipped_below_four_values() {
        let engine = ValidationEngine::default().with_schema(ExpectedSchema::empty());
        let record = EsgRecord::new()
            .with_field(EsgCategory::Environmental, "a", 10.0)
            .with_field(EsgCategory::Environmental, "b", 11.0)
            .with_field(EsgCategory::Environmental, "c", 9_000_000.0)
            .with_period_end(as_of());
        let result = engine.validate_at(&record, as_of()).unwrap();
        assert!(!result.has_anomaly(AnomalyKind::Outlier));
    }

    #[test]
    fn test_placeholder_values_flagged() {
        let engine = ValidationEngine::default().with_schema(ExpectedSchema::empty());
        let record = EsgRecord::new()
            .with_field(EsgCategory::Environmental, "emissions", 999_999.0)
            .with_period_end(as_of());
        let result = engine.validate_at(&record, as_of()).unwrap();

        let suspicious: Vec<_> = result.anomalies_of_kind(AnomalyKind::Suspicious).collect();
        assert_eq!(suspicious.len(), 1);
        assert_eq!(suspicious[0].severity, AnomalySeverity::Medium);
        assert_eq!(suspicious[0].observed, Some(999_999.0));
    }

    #[test]
    fn test_repeated_values_flagged_once_per_group() {
        let engine = ValidationEngine::default().with_schema(ExpectedSchema::empty());
        let record = EsgRecord::new()
            .with_field(EsgCategory::Environmental, "emissions", 42.0)
            .with_field(EsgCategory::Social, "employee_count", 42.0)
            .with_field(EsgCategory::Governance, "board_size", 42.0)
            .with_period_end(as_of());
        let result = engine.validate_at(&record, as_of()).unwrap();

        let duplicates: Vec<_> = result.anomalies_of_kind(AnomalyKind::Inconsistent).collect();
        assert_eq!(duplicates.len(), 1);
        assert!(duplicates[0].description.contains("3 fields"));
        assert!(duplicates[0].description.contains("governance.board_size"));
    }

    #[test]
    fn test_zero_repeats_are_not_duplicates() {
        let engine = ValidationEngine::default().with_schema(ExpectedSchema::empty());
        let record = EsgRecord::new()
            .with_field(EsgCategory::Environmental, "emissions", 0.0)
            .with_field(EsgCategory::Environmental, "waste_generated", 0.0)
            .with_field(EsgCategory::Governance, "ethics_violations", 0.0)
            .with_period_end(as_of());
        let result = engine.validate_at(&record, as_of()).unwrap();
        assert!(!result.has_anomaly(AnomalyKind::Inconsistent));
    }

    #[test]
    fn test_percentage_out_of_range_is_hard_error() {
        let engine = ValidationEngine::default();
        let record = full_record().with_field(EsgCategory::Social, "turnover_rate", 150.0);
        let result = engine.validate_at(&record, as_of()).unwrap();

        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("social.turnover_rate"));
    }

    #[test]
    fn test_negative_quantity_is_hard_error() {
        let engine = ValidationEngine::default();
        let record = full_record().with_field(EsgCategory::Environmental, "emissions", -5.0);
        let result = engine.validate_at(&record, as_of()).unwrap();

        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("negative")));
    }

    #[test]
    fn test_text_in_numeric_field_is_hard_error() {
        let engine = ValidationEngine::default();
        let record = full_record().with_field(EsgCategory::Social, "turnover_rate", "n/a");
        let result = engine.validate_at(&record, as_of()).unwrap();

        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("numeric")));
    }

    #[test]
    fn test_plausibility_limit_is_soft() {
        let record = full_record().with_field(EsgCategory::Governance, "board_size", 45.0);
        let engine = ValidationEngine::default().with_reference(matching_reference(&record));
        let result = engine.validate_at(&record, as_of()).unwrap();

        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.iter().any(|w| w.contains("board_size")));
    }

    #[test]
    fn test_accuracy_reflects_error_fraction() {
        let engine = ValidationEngine::default().with_schema(
            ExpectedSchema::empty()
                .with_field(EsgCategory::Social, FieldSpec::percentage("turnover_rate")),
        );
        let record = EsgRecord::new()
            .with_field(EsgCategory::Social, "turnover_rate", 150.0)
            .with_field(EsgCategory::Social, "a", 1.0)
            .with_field(EsgCategory::Social, "b", 2.0)
            .with_field(EsgCategory::Social, "c", 3.0)
            .with_period_end(as_of());
        let result = engine.validate_at(&record, as_of()).unwrap();

        // 1 hard error across 4 reported fields
        assert_eq!(result.data_quality.accuracy, 75.0);
    }

    #[test]
    fn test_timeliness_decay() {
        let engine = ValidationEngine::default();
        let cases = [
            (30, 100.0),
            (365, 0.0),
            (400, 0.0),
            (180, 100.0 * (365.0 - 180.0) / 335.0),
        ];
        for (age_days, expected) in cases {
            let record = full_record().with_period_end(as_of() - chrono::Duration::days(age_days));
            let result = engine.validate_at(&record, as_of()).unwrap();
            assert!(
                (result.data_quality.timeliness - expected).abs() < 1e-9,
                "age {age_days}: got {}",
                result.data_quality.timeliness
            );
        }
    }

    #[test]
    fn test_missing_period_end_scores_neutral_with_warning() {
        let engine = ValidationEngine::default();
        let record = EsgRecord::new().with_field(EsgCategory::Environmental, "emissions", 100.0);
        let result = engine.validate_at(&record, as_of()).unwrap();

        assert_eq!(result.data_quality.timeliness, NEUTRAL_TIMELINESS);
        assert!(result.warnings.iter().any(|w| w.contains("timeliness")));
    }

    #[test]
    fn test_future_period_end_is_fresh_but_warned() {
        let engine = ValidationEngine::default();
        let record = full_record().with_period_end(as_of() + chrono::Duration::days(90));
        let result = engine.validate_at(&record, as_of()).unwrap();

        assert_eq!(result.data_quality.timeliness, 100.0);
        assert!(result.warnings.iter().any(|w| w.contains("future")));
    }

    #[test]
    fn test_empty_record_rejected() {
        let engine = ValidationEngine::default();
        let err = engine.validate_at(&EsgRecord::new(), as_of()).unwrap_err();
        assert!(matches!(err, DomainError::EmptyRecord));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_non_finite_value_rejected() {
        let engine = ValidationEngine::default();
        let record = EsgRecord::new().with_field(EsgCategory::Environmental, "emissions", f64::NAN);
        let err = engine.validate_at(&record, as_of()).unwrap_err();
        assert!(matches!(err, DomainError::NonFiniteValue(field) if field == "environmental.emissions"));
    }

    #[test]
    fn test_same_input_same_output() {
        let record = full_record()
            .with_field(EsgCategory::Social, "turnover_rate", 150.0)
            .with_field(EsgCategory::Environmental, "emissions", 999_999.0);
        let engine = ValidationEngine::default();

        let first = serde_json::to_string(&engine.validate_at(&record, as_of()).unwrap()).unwrap();
        let second = serde_json::to_string(&engine.validate_at(&record, as_of()).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_high_severity_anomaly_costs_ten_points() {
        let reference = Arc::new(
            ReferenceTable::new()
                .with_entry("environmental.emissions", ReferenceStats::new(100.0, 10.0)),
        );
        let engine = ValidationEngine::default()
            .with_schema(ExpectedSchema::empty())
            .with_reference(reference);
        let record = EsgRecord::new()
            .with_field(EsgCategory::Environmental, "emissions", 150.0)
            .with_period_end(as_of());
        let result = engine.validate_at(&record, as_of()).unwrap();

        // Quality is perfect, the single high-severity outlier deducts 10
        assert_eq!(result.score, 90.0);
        assert!(result.is_valid);
    }

    #[test]
    fn test_sparse_record_fails_threshold() {
        let engine = ValidationEngine::default();
        let record = EsgRecord::new().with_field(EsgCategory::Environmental, "emissions", 125_000.0);
        let result = engine.validate_at(&record, as_of()).unwrap();

        // 14 missing-field anomalies at medium severity sink the score
        assert!(!result.is_valid);
        assert!(result.score < engine.config().pass_threshold);
        assert!(result.errors.is_empty());
        assert!(
            result
                .recommendations
                .iter()
                .any(|r| r.contains("completeness") || r.contains("missing"))
        );
    }
}
