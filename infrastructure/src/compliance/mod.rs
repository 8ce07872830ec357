//! Compliance checking adapters

mod rule_table;

pub use rule_table::RuleTableComplianceChecker;
