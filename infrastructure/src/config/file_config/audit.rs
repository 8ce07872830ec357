//! `[audit]` section: the JSONL audit trail

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw audit settings from the configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAuditConfig {
    /// Whether lifecycle events are written at all
    pub enabled: bool,
    /// Destination file; one JSON object per line, appended across runs
    pub path: PathBuf,
}

impl Default for FileAuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from("esg-audit.jsonl"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_disabled() {
        let config = FileAuditConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.path, PathBuf::from("esg-audit.jsonl"));
    }

    #[test]
    fn test_enabling_with_custom_path() {
        let config: FileAuditConfig = toml::from_str(
            r#"
            enabled = true
            path = "/var/log/esg/trail.jsonl"
            "#,
        )
        .unwrap();
        assert!(config.enabled);
        assert_eq!(config.path, PathBuf::from("/var/log/esg/trail.jsonl"));
    }
}
