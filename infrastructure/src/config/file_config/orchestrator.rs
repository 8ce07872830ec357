//! `[orchestrator]` section: pipeline capacity limits

use super::ConfigIssue;
use esg_application::OrchestratorParams;
use serde::{Deserialize, Serialize};

/// Raw orchestrator limits from the configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOrchestratorConfig {
    /// Backpressure bound on the submission queue
    pub queue_capacity: usize,
    /// Worker permits; tasks beyond this wait in the queue
    pub max_concurrent_tasks: usize,
}

impl Default for FileOrchestratorConfig {
    fn default() -> Self {
        let params = OrchestratorParams::default();
        Self {
            queue_capacity: params.queue_capacity,
            max_concurrent_tasks: params.max_concurrent_tasks,
        }
    }
}

impl FileOrchestratorConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.queue_capacity == 0 {
            issues.push(ConfigIssue::error(
                "orchestrator.queue_capacity",
                "queue capacity must be at least 1",
            ));
        }
        if self.max_concurrent_tasks == 0 {
            issues.push(ConfigIssue::error(
                "orchestrator.max_concurrent_tasks",
                "at least one worker is required",
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_params_default() {
        let config = FileOrchestratorConfig::default();
        assert_eq!(config.queue_capacity, 64);
        assert_eq!(config.max_concurrent_tasks, 4);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_zero_capacity_is_an_error() {
        let config: FileOrchestratorConfig = toml::from_str("queue_capacity = 0").unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
    }
}
