//! `[classifier]` section: insight scoring backend selection

use super::ConfigIssue;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which classifier adapter to wire up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierBackend {
    /// Deterministic in-process scoring, no network
    Local,
    /// Remote scoring service over HTTP
    Http,
}

/// Raw classifier settings from the configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileClassifierConfig {
    /// Backend name: `local` or `http`
    pub backend: String,
    /// Endpoint of the HTTP backend; ignored by `local`
    pub endpoint: String,
    /// Patience per classifier call before the fallback answers instead
    pub timeout_seconds: u64,
}

impl Default for FileClassifierConfig {
    fn default() -> Self {
        Self {
            backend: "local".to_string(),
            endpoint: "http://localhost:8080/classify".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl FileClassifierConfig {
    /// Resolve the backend name, warning and falling back to `local`
    /// when the name is unknown
    pub fn parse_backend(&self) -> (ClassifierBackend, Vec<ConfigIssue>) {
        match self.backend.to_ascii_lowercase().as_str() {
            "local" => (ClassifierBackend::Local, Vec::new()),
            "http" => (ClassifierBackend::Http, Vec::new()),
            other => (
                ClassifierBackend::Local,
                vec![ConfigIssue::warning(
                    "classifier.backend",
                    format!("unknown backend '{other}', using 'local' (valid: local, http)"),
                )],
            ),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let (backend, mut issues) = self.parse_backend();
        if self.timeout_seconds == 0 {
            issues.push(ConfigIssue::error(
                "classifier.timeout_seconds",
                "timeout must be at least one second",
            ));
        }
        if backend == ClassifierBackend::Http && self.endpoint.trim().is_empty() {
            issues.push(ConfigIssue::error(
                "classifier.endpoint",
                "http backend needs an endpoint",
            ));
        }
        issues
    }
}
