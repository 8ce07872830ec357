//! Table-driven compliance checking

use async_trait::async_trait;
use esg_application::{ComplianceChecker, ComplianceError};
use esg_domain::{ComplianceResult, EsgRecord, FrameworkRules};

/// Checks records against declarative requirement tables
///
/// Holds the framework tables it was configured with; evaluation itself
/// is a pure table scan in the domain. The port is async for the sake
/// of richer backends, this adapter never awaits anything.
pub struct RuleTableComplianceChecker {
    tables: Vec<FrameworkRules>,
}

impl RuleTableComplianceChecker {
    /// Checker over all built-in frameworks
    pub fn new() -> Self {
        let tables = FrameworkRules::builtin_names()
            .iter()
            .filter_map(|name| FrameworkRules::builtin(name))
            .collect();
        Self { tables }
    }

    /// Checker over an explicit table set, e.g. from configuration
    pub fn with_tables(tables: Vec<FrameworkRules>) -> Result<Self, ComplianceError> {
        if tables.is_empty() {
            return Err(ComplianceError::NoFrameworks);
        }
        Ok(Self { tables })
    }

    fn table(&self, framework: &str) -> Option<&FrameworkRules> {
        self.tables
            .iter()
            .find(|table| table.framework.eq_ignore_ascii_case(framework))
    }
}

impl Default for RuleTableComplianceChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ComplianceChecker for RuleTableComplianceChecker {
    async fn check(
        &self,
        record: &EsgRecord,
        framework: &str,
    ) -> Result<ComplianceResult, ComplianceError> {
        let table = self
            .table(framework)
            .ok_or_else(|| ComplianceError::UnknownFramework(framework.to_string()))?;
        Ok(table.evaluate(record))
    }

    fn frameworks(&self) -> Vec<String> {
        self.tables
            .iter()
            .map(|table| table.framework.clone())
            .collect()
    }
}
