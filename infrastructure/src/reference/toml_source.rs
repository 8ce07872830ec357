//! Reference baselines from a TOML file
//!
//! Expected layout, one table per field grouped by category:
//!
//! ```toml
//! [environmental.emissions]
//! mean = 120000.0
//! std_dev = 25000.0
//!
//! [social.employee_count]
//! mean = 4000.0
//! std_dev = 1500.0
//! ```

use async_trait::async_trait;
use esg_application::{ReferenceError, ReferenceSource};
use esg_domain::{ReferenceStats, ReferenceTable};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads per-field baselines from a TOML file on disk
pub struct TomlReferenceSource {
    path: PathBuf,
}

impl TomlReferenceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ReferenceSource for TomlReferenceSource {
    async fn load(&self) -> Result<Option<ReferenceTable>, ReferenceError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No baseline file, running without references");
            return Ok(None);
        }

        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ReferenceError::ReadError(format!("{}: {e}", self.path.display()))
        })?;

        let by_category: BTreeMap<String, BTreeMap<String, ReferenceStats>> =
            toml::from_str(&raw).map_err(|e| ReferenceError::ParseError(e.to_string()))?;

        let mut table = ReferenceTable::new();
        for (category, fields) in by_category {
            for (field, stats) in fields {
                table.insert(format!("{category}.{field}"), stats);
            }
        }

        debug!(
            path = %self.path.display(),
            entries = table.len(),
            "Loaded reference baselines"
        );
        Ok(Some(table))
    }
}
