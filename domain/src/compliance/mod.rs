//! Compliance domain module
//!
//! Framework requirement tables (GRI, SASB, TCFD, CSRD) and the
//! entities describing how fully a record satisfies them.

pub mod entities;
pub mod rules;

pub use entities::{ComplianceResult, ComplianceStatus, ComplianceSummary};
pub use rules::{FrameworkRules, Requirement};
