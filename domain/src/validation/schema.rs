//! Expected-field schema for ESG records
//!
//! The schema names the fields a complete submission discloses per
//! category, what kind of value each field holds, and where a value
//! stops being plausible. Completeness scoring and range checking are
//! both driven from here.

use crate::core::record::EsgCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What kind of value a schema field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Percentage, valid range 0 to 100
    Percentage,
    /// Non-negative physical quantity or count
    Quantity,
    /// Free-form text, exempt from numeric checks
    Text,
}

/// Expectations for a single field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    /// Values above this are plausible but worth a warning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warn_above: Option<f64>,
}

impl FieldSpec {
    pub fn percentage(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Percentage,
            warn_above: None,
        }
    }

    pub fn quantity(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Quantity,
            warn_above: None,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Text,
            warn_above: None,
        }
    }

    pub fn with_warn_above(mut self, limit: f64) -> Self {
        self.warn_above = Some(limit);
        self
    }

    /// Hard validity bounds implied by the field kind, if any
    pub fn hard_range(&self) -> Option<(f64, f64)> {
        match self.kind {
            FieldKind::Percentage => Some((0.0, 100.0)),
            FieldKind::Quantity => Some((0.0, f64::MAX)),
            FieldKind::Text => None,
        }
    }
}

/// The set of fields a complete record is expected to disclose
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpectedSchema {
    categories: BTreeMap<EsgCategory, Vec<FieldSpec>>,
}

impl ExpectedSchema {
    /// A schema expecting nothing (completeness always full)
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard reporting schema: five disclosures per category
    pub fn standard() -> Self {
        Self::empty()
            .with_field(
                EsgCategory::Environmental,
                FieldSpec::quantity("emissions").with_warn_above(1_000_000.0),
            )
            .with_field(
                EsgCategory::Environmental,
                FieldSpec::quantity("energy_consumption").with_warn_above(10_000_000.0),
            )
            .with_field(
                EsgCategory::Environmental,
                FieldSpec::quantity("water_usage").with_warn_above(10_000_000.0),
            )
            .with_field(
                EsgCategory::Environmental,
                FieldSpec::quantity("waste_generated").with_warn_above(1_000_000.0),
            )
            .with_field(
                EsgCategory::Environmental,
                FieldSpec::percentage("renewable_energy_percent"),
            )
            .with_field(
                EsgCategory::Social,
                FieldSpec::quantity("employee_count").with_warn_above(3_000_000.0),
            )
            .with_field(EsgCategory::Social, FieldSpec::percentage("turnover_rate"))
            .with_field(
                EsgCategory::Social,
                FieldSpec::quantity("training_hours").with_warn_above(400.0),
            )
            .with_field(
                EsgCategory::Social,
                FieldSpec::percentage("diversity_percent"),
            )
            .with_field(
                EsgCategory::Social,
                FieldSpec::quantity("injury_rate").with_warn_above(50.0),
            )
            .with_field(
                EsgCategory::Governance,
                FieldSpec::quantity("board_size").with_warn_above(30.0),
            )
            .with_field(
                EsgCategory::Governance,
                FieldSpec::percentage("independent_directors_percent"),
            )
            .with_field(
                EsgCategory::Governance,
                FieldSpec::percentage("board_diversity_percent"),
            )
            .with_field(
                EsgCategory::Governance,
                FieldSpec::quantity("ethics_violations").with_warn_above(100.0),
            )
            .with_field(EsgCategory::Governance, FieldSpec::text("audit_committee"))
    }

    pub fn with_field(mut self, category: EsgCategory, spec: FieldSpec) -> Self {
        self.categories.entry(category).or_default().push(spec);
        self
    }

    /// Expected fields for a category, in schema order
    pub fn fields(&self, category: EsgCategory) -> &[FieldSpec] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Look up the spec for a single field
    pub fn spec_for(&self, category: EsgCategory, name: &str) -> Option<&FieldSpec> {
        self.fields(category).iter().find(|spec| spec.name == name)
    }

    /// Total number of expected fields across all categories
    pub fn total_fields(&self) -> usize {
        self.categories.values().map(|fields| fields.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_fields() == 0
    }

    /// Iterate `(category, spec)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (EsgCategory, &FieldSpec)> {
        self.categories
            .iter()
            .flat_map(|(category, fields)| fields.iter().map(move |spec| (*category, spec)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_schema_shape() {
        let schema = ExpectedSchema::standard();
        assert_eq!(schema.total_fields(), 15);
        for category in EsgCategory::all() {
            assert_eq!(schema.fields(category).len(), 5);
        }
    }

    #[test]
    fn test_hard_ranges() {
        let pct = FieldSpec::percentage("turnover_rate");
        assert_eq!(pct.hard_range(), Some((0.0, 100.0)));

        let qty = FieldSpec::quantity("emissions");
        assert_eq!(qty.hard_range().map(|(low, _)| low), Some(0.0));

        assert_eq!(FieldSpec::text("audit_committee").hard_range(), None);
    }

    #[test]
    fn test_spec_lookup() {
        let schema = ExpectedSchema::standard();
        let spec = schema
            .spec_for(EsgCategory::Governance, "board_size")
            .unwrap();
        assert_eq!(spec.kind, FieldKind::Quantity);
        assert_eq!(spec.warn_above, Some(30.0));

        assert!(schema.spec_for(EsgCategory::Governance, "revenue").is_none());
    }

    #[test]
    fn test_custom_schema() {
        let schema = ExpectedSchema::empty()
            .with_field(EsgCategory::Social, FieldSpec::quantity("employee_count"));
        assert_eq!(schema.total_fields(), 1);
        assert!(schema.fields(EsgCategory::Environmental).is_empty());
    }
}
