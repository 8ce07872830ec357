//! Small statistics helpers and reference distributions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary statistics of a historical baseline for one field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl ReferenceStats {
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    /// Standard score of `value` against this baseline.
    ///
    /// Returns `None` when the baseline has no spread, in which case a
    /// z-test is meaningless.
    pub fn z_score(&self, value: f64) -> Option<f64> {
        if self.std_dev > 0.0 {
            Some((value - self.mean) / self.std_dev)
        } else {
            None
        }
    }

    /// The band `mean ± width * std_dev`
    pub fn band(&self, width: f64) -> (f64, f64) {
        (
            self.mean - width * self.std_dev,
            self.mean + width * self.std_dev,
        )
    }
}

/// Reference distributions keyed by qualified field name,
/// e.g. `environmental.emissions`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTable {
    entries: BTreeMap<String, ReferenceStats>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, field: impl Into<String>, stats: ReferenceStats) -> Self {
        self.entries.insert(field.into(), stats);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, stats: ReferenceStats) {
        self.entries.insert(field.into(), stats);
    }

    pub fn get(&self, field: &str) -> Option<&ReferenceStats> {
        self.entries.get(field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReferenceStats)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation, `None` below two values
pub fn std_deviation(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values)?;
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// First and third quartile by linear interpolation, `None` below
/// four values
pub fn quartiles(values: &[f64]) -> Option<(f64, f64)> {
    if values.len() < 4 {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some((quantile(&sorted, 0.25), quantile(&sorted, 0.75)))
}

fn quantile(sorted: &[f64], p: f64) -> f64 {
    let position = p * (sorted.len() - 1) as f64;
    let low = position.floor() as usize;
    let high = position.ceil() as usize;
    if low == high {
        sorted[low]
    } else {
        let fraction = position - low as f64;
        sorted[low] + fraction * (sorted[high] - sorted[low])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[3.0]), Some(3.0));
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
    }

    #[test]
    fn test_std_deviation() {
        assert_eq!(std_deviation(&[]), None);
        assert_eq!(std_deviation(&[5.0]), None);
        // Spread of 2, 4, 4, 4, 5, 5, 7, 9 is exactly 2
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((std_deviation(&values).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_quartiles() {
        assert_eq!(quartiles(&[1.0, 2.0, 3.0]), None);

        let (q1, q3) = quartiles(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((q1 - 1.75).abs() < 1e-12);
        assert!((q3 - 3.25).abs() < 1e-12);

        // Order of input must not matter
        let (q1b, q3b) = quartiles(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!((q1, q3), (q1b, q3b));
    }

    #[test]
    fn test_z_score() {
        let stats = ReferenceStats::new(100.0, 10.0);
        assert_eq!(stats.z_score(120.0), Some(2.0));
        assert_eq!(stats.z_score(70.0), Some(-3.0));
        assert_eq!(ReferenceStats::new(100.0, 0.0).z_score(120.0), None);
    }

    #[test]
    fn test_band() {
        let stats = ReferenceStats::new(100.0, 10.0);
        assert_eq!(stats.band(2.5), (75.0, 125.0));
    }

    #[test]
    fn test_reference_table() {
        let table = ReferenceTable::new()
            .with_entry("environmental.emissions", ReferenceStats::new(100_000.0, 20_000.0));
        assert_eq!(table.len(), 1);
        assert!(table.get("environmental.emissions").is_some());
        assert!(table.get("social.turnover_rate").is_none());
    }
}
