//! Configuration loading and merging
//!
//! Priority (highest wins):
//! 1. Explicit `--config` path
//! 2. Environment variables (`ESG_ANALYZER_*`)
//! 3. Project config (`./esg-analyzer.toml` or `./.esg-analyzer.toml`)
//! 4. Global config (`~/.config/esg-analyzer/config.toml`)
//! 5. Built-in defaults

mod file_config;
mod loader;

pub use file_config::{
    ClassifierBackend, ConfigIssue, FileAuditConfig, FileClassifierConfig, FileComplianceConfig,
    FileConfig, FileOrchestratorConfig, FileReferenceConfig, FileScoringConfig,
    FileValidationConfig, IssueSeverity,
};
pub use loader::ConfigLoader;
