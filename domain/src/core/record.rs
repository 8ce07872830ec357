//! ESG record value objects

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

use super::error::DomainError;

/// The three ESG reporting categories (Value Object)
///
/// Every field in an [`EsgRecord`] belongs to exactly one category.
/// The declaration order is the canonical order used for deterministic
/// iteration and aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EsgCategory {
    Environmental,
    Social,
    Governance,
}

impl EsgCategory {
    /// Get the string identifier for this category
    pub fn as_str(&self) -> &str {
        match self {
            EsgCategory::Environmental => "environmental",
            EsgCategory::Social => "social",
            EsgCategory::Governance => "governance",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            EsgCategory::Environmental => "Environmental",
            EsgCategory::Social => "Social",
            EsgCategory::Governance => "Governance",
        }
    }

    /// All categories in canonical order
    pub fn all() -> [EsgCategory; 3] {
        [
            EsgCategory::Environmental,
            EsgCategory::Social,
            EsgCategory::Governance,
        ]
    }
}

impl std::fmt::Display for EsgCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EsgCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "environmental" => Ok(EsgCategory::Environmental),
            "social" => Ok(EsgCategory::Social),
            "governance" => Ok(EsgCategory::Governance),
            other => Err(DomainError::UnknownCategory(other.to_string())),
        }
    }
}

impl Serialize for EsgCategory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EsgCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A single reported field value: numeric or free-form text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Get the numeric value, if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }

    /// Get the text value, if this is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Number(_) => None,
            FieldValue::Text(s) => Some(s),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldValue::Number(_))
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

/// An ESG dataset submission (Value Object)
///
/// Maps each [`EsgCategory`] to its reported fields. Backed by `BTreeMap`s
/// so that iteration order, and therefore every derived analysis result,
/// is deterministic for a given record.
///
/// Records are immutable for the duration of an analysis: builders are the
/// only mutation surface and analyses only ever borrow.
///
/// # Example
///
/// ```
/// use esg_domain::{EsgCategory, EsgRecord};
///
/// let record = EsgRecord::new()
///     .with_field(EsgCategory::Environmental, "emissions", 125_000.0)
///     .with_field(EsgCategory::Social, "employee_count", 5_200.0);
///
/// assert_eq!(record.field_count(), 2);
/// assert!(record.has_field(EsgCategory::Environmental, "emissions"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EsgRecord {
    #[serde(flatten)]
    categories: BTreeMap<EsgCategory, BTreeMap<String, FieldValue>>,
    /// End of the reporting period the data covers, used by timeliness scoring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    period_end: Option<NaiveDate>,
}

impl EsgRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field to a category
    pub fn with_field(
        mut self,
        category: EsgCategory,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Self {
        self.categories
            .entry(category)
            .or_default()
            .insert(name.into(), value.into());
        self
    }

    /// Add an empty category (present but with no fields)
    pub fn with_category(mut self, category: EsgCategory) -> Self {
        self.categories.entry(category).or_default();
        self
    }

    /// Set the reporting-period end date
    pub fn with_period_end(mut self, date: NaiveDate) -> Self {
        self.period_end = Some(date);
        self
    }

    /// Get the fields of a category, if it is present
    pub fn category(&self, category: EsgCategory) -> Option<&BTreeMap<String, FieldValue>> {
        self.categories.get(&category)
    }

    /// Get a single field value
    pub fn field(&self, category: EsgCategory, name: &str) -> Option<&FieldValue> {
        self.categories.get(&category).and_then(|f| f.get(name))
    }

    /// Check whether a field is present in a category
    pub fn has_field(&self, category: EsgCategory, name: &str) -> bool {
        self.field(category, name).is_some()
    }

    /// End of the reporting period, if declared
    pub fn period_end(&self) -> Option<NaiveDate> {
        self.period_end
    }

    /// Total number of fields across all categories
    pub fn field_count(&self) -> usize {
        self.categories.values().map(|f| f.len()).sum()
    }

    /// True when no category carries any field
    pub fn is_empty(&self) -> bool {
        self.categories.values().all(|f| f.is_empty())
    }

    /// Iterate all fields as `(category, name, value)` in canonical order
    pub fn fields(&self) -> impl Iterator<Item = (EsgCategory, &str, &FieldValue)> {
        self.categories.iter().flat_map(|(category, fields)| {
            fields
                .iter()
                .map(move |(name, value)| (*category, name.as_str(), value))
        })
    }

    /// Flatten all numeric fields into `(qualified_name, value)` pairs,
    /// e.g. `("environmental.emissions", 125000.0)`, in canonical order
    pub fn numeric_fields(&self) -> Vec<(String, f64)> {
        self.fields()
            .filter_map(|(category, name, value)| {
                value
                    .as_number()
                    .map(|n| (format!("{}.{}", category.as_str(), name), n))
            })
            .collect()
    }

    /// Find the first numeric field holding a NaN or infinite value
    pub fn first_non_finite(&self) -> Option<String> {
        self.numeric_fields()
            .into_iter()
            .find(|(_, v)| !v.is_finite())
            .map(|(name, _)| name)
    }
}
