//! Typed representation of the TOML configuration file
//!
//! Each section of the file maps to one submodule. Every field has a
//! default, so an empty file (or no file at all) yields a fully usable
//! configuration. Validation never panics and never aborts early; it
//! collects every problem it can find so the user sees them all at once.

mod audit;
mod classifier;
mod compliance;
mod orchestrator;
mod reference;
mod scoring;
mod validation;

pub use audit::FileAuditConfig;
pub use classifier::{ClassifierBackend, FileClassifierConfig};
pub use compliance::FileComplianceConfig;
pub use orchestrator::FileOrchestratorConfig;
pub use reference::FileReferenceConfig;
pub use scoring::FileScoringConfig;
pub use validation::FileValidationConfig;

use esg_application::OrchestratorParams;
use serde::{Deserialize, Serialize};

/// How serious a configuration issue is
///
/// Warnings are reported and worked around (unknown framework names are
/// skipped, an unknown backend falls back to `local`). Errors mean the
/// configuration cannot drive an analysis and must be fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    Warning,
    Error,
}

/// One problem found while validating a configuration
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: IssueSeverity,
    /// Dotted path of the offending field, e.g. `classifier.backend`
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Error,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == IssueSeverity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.severity {
            IssueSeverity::Warning => "warning",
            IssueSeverity::Error => "error",
        };
        write!(f, "{label}: [{}] {}", self.field, self.message)
    }
}

/// Root of the configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub scoring: FileScoringConfig,
    pub validation: FileValidationConfig,
    pub classifier: FileClassifierConfig,
    pub compliance: FileComplianceConfig,
    pub orchestrator: FileOrchestratorConfig,
    pub reference: FileReferenceConfig,
    pub audit: FileAuditConfig,
}

impl FileConfig {
    /// Check the whole configuration and collect every issue found
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if let Err(e) = self.scoring.to_score_weights().validate() {
            issues.push(ConfigIssue::error("scoring", e.to_string()));
        }
        if let Err(e) = self.validation.to_validation_config().validate() {
            issues.push(ConfigIssue::error("validation", e.to_string()));
        }
        issues.extend(self.classifier.validate());
        issues.extend(self.compliance.resolve_rules().1);
        issues.extend(self.orchestrator.validate());
        if self.audit.enabled && self.audit.path.as_os_str().is_empty() {
            issues.push(ConfigIssue::error(
                "audit.path",
                "auditing is enabled but no path is set",
            ));
        }

        issues
    }

    /// True when no issue of [`IssueSeverity::Error`] was found
    pub fn is_usable(&self) -> bool {
        !self.validate().iter().any(ConfigIssue::is_error)
    }

    /// Assemble the pipeline parameters from the relevant sections
    pub fn to_orchestrator_params(&self) -> OrchestratorParams {
        OrchestratorParams::default()
            .with_queue_capacity(self.orchestrator.queue_capacity)
            .with_max_concurrent_tasks(self.orchestrator.max_concurrent_tasks)
            .with_classifier_timeout(self.classifier.timeout())
            .with_score_weights(self.scoring.to_score_weights())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_no_issues() {
        let config = FileConfig::default();
        let issues = config.validate();
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
        assert!(config.is_usable());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.validate().is_empty());
        assert_eq!(config.orchestrator.queue_capacity, 64);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [orchestrator]
            queue_capacity = 128
            "#,
        )
        .unwrap();
        assert_eq!(config.orchestrator.queue_capacity, 128);
        assert_eq!(config.orchestrator.max_concurrent_tasks, 4);
        assert_eq!(config.classifier.backend, "local");
    }

    #[test]
    fn test_bad_weights_are_an_error() {
        let config: FileConfig = toml::from_str(
            r#"
            [scoring]
            environmental_weight = 0.9
            social_weight = 0.9
            governance_weight = 0.9
            "#,
        )
        .unwrap();
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.is_error() && i.field == "scoring"));
        assert!(!config.is_usable());
    }

    #[test]
    fn test_enabled_audit_needs_a_path() {
        let config: FileConfig = toml::from_str(
            r#"
            [audit]
            enabled = true
            path = ""
            "#,
        )
        .unwrap();
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.field == "audit.path"));
    }

    #[test]
    fn test_to_orchestrator_params_combines_sections() {
        let config: FileConfig = toml::from_str(
            r#"
            [orchestrator]
            queue_capacity = 16
            max_concurrent_tasks = 2

            [classifier]
            timeout_seconds = 5

            [scoring]
            environmental_weight = 0.5
            social_weight = 0.3
            governance_weight = 0.2
            "#,
        )
        .unwrap();
        let params = config.to_orchestrator_params();
        assert_eq!(params.queue_capacity, 16);
        assert_eq!(params.max_concurrent_tasks, 2);
        assert_eq!(params.classifier_timeout.as_secs(), 5);
        assert!((params.score_weights.environmental - 0.5).abs() < f64::EPSILON);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_issue_display() {
        let issue = ConfigIssue::warning("classifier.backend", "unknown value 'x'");
        assert_eq!(
            issue.to_string(),
            "warning: [classifier.backend] unknown value 'x'"
        );
    }
}
