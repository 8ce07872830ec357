//! `[compliance]` section: which framework tables to check against

use super::ConfigIssue;
use esg_domain::FrameworkRules;
use serde::{Deserialize, Serialize};

/// Raw compliance settings from the configuration file
///
/// `frameworks` is the active list; `custom` defines extra requirement
/// tables that entries in `frameworks` may refer to. A custom table
/// with the same name as a built-in replaces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileComplianceConfig {
    /// Framework names to check, built-in or custom
    pub frameworks: Vec<String>,
    /// Requirement tables defined inline in the file
    pub custom: Vec<FrameworkRules>,
}

impl Default for FileComplianceConfig {
    fn default() -> Self {
        Self {
            frameworks: FrameworkRules::builtin_names()
                .iter()
                .map(|name| name.to_string())
                .collect(),
            custom: Vec::new(),
        }
    }
}

impl FileComplianceConfig {
    /// Resolve the active framework names into requirement tables
    ///
    /// Unknown names are skipped with a warning. An empty result is an
    /// error; a checker without tables cannot certify anything.
    pub fn resolve_rules(&self) -> (Vec<FrameworkRules>, Vec<ConfigIssue>) {
        let mut rules = Vec::new();
        let mut issues = Vec::new();

        for name in &self.frameworks {
            let custom = self
                .custom
                .iter()
                .find(|table| table.framework.eq_ignore_ascii_case(name));
            match custom {
                Some(table) if table.requirements.is_empty() => {
                    issues.push(ConfigIssue::warning(
                        "compliance.custom",
                        format!("custom framework '{name}' has no requirements, skipping"),
                    ));
                }
                Some(table) => rules.push(table.clone()),
                None => match FrameworkRules::builtin(name) {
                    Some(table) => rules.push(table),
                    None => issues.push(ConfigIssue::warning(
                        "compliance.frameworks",
                        format!("unknown framework '{name}', skipping"),
                    )),
                },
            }
        }

        if rules.is_empty() {
            issues.push(ConfigIssue::error(
                "compliance.frameworks",
                "no usable frameworks configured",
            ));
        }
        (rules, issues)
    }
}
