//! `[reference]` section: where historical baselines come from

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw reference settings from the configuration file
///
/// With no path set, the validation engine runs without baselines and
/// falls back to distribution-free outlier checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReferenceConfig {
    /// TOML file of per-field baselines, grouped by category
    pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_path() {
        assert!(FileReferenceConfig::default().path.is_none());
    }

    #[test]
    fn test_path_parses() {
        let config: FileReferenceConfig =
            toml::from_str(r#"path = "baselines.toml""#).unwrap();
        assert_eq!(config.path, Some(PathBuf::from("baselines.toml")));
    }
}
