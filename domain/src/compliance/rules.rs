//! Declarative framework requirement tables
//!
//! Each framework is a list of requirements, each tied to one field in
//! one category. Checking a record is a pure table scan: a requirement
//! is credited when its field is present, and the framework score is
//! credited over total credits.

use super::entities::{ComplianceResult, ComplianceStatus};
use crate::core::record::{EsgCategory, EsgRecord};
use serde::{Deserialize, Serialize};

/// One disclosure a framework asks for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Requirement name as the framework labels it
    pub name: String,
    /// Category the disclosure belongs to
    pub category: EsgCategory,
    /// Field whose presence satisfies the requirement
    pub field: String,
    /// Credits granted when satisfied; core disclosures weigh more
    pub credits: usize,
}

impl Requirement {
    pub fn new(name: impl Into<String>, category: EsgCategory, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category,
            field: field.into(),
            credits: 1,
        }
    }

    pub fn with_credits(mut self, credits: usize) -> Self {
        self.credits = credits;
        self
    }
}

/// A framework's complete requirement table
///
/// # Example
///
/// ```
/// use esg_domain::{EsgCategory, EsgRecord, FrameworkRules};
///
/// let record = EsgRecord::new()
///     .with_field(EsgCategory::Environmental, "emissions", 125_000.0);
///
/// let result = FrameworkRules::gri().evaluate(&record);
/// // The emissions disclosure alone earns two of twelve credits
/// assert_eq!(result.met_requirements, 2);
/// assert_eq!(result.total_requirements, 12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkRules {
    pub framework: String,
    pub requirements: Vec<Requirement>,
}

impl FrameworkRules {
    pub fn new(framework: impl Into<String>) -> Self {
        Self {
            framework: framework.into(),
            requirements: Vec::new(),
        }
    }

    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    /// Sum of all requirement credits
    pub fn total_credits(&self) -> usize {
        self.requirements.iter().map(|r| r.credits).sum()
    }

    /// Check a record against this table
    pub fn evaluate(&self, record: &EsgRecord) -> ComplianceResult {
        let mut met = 0;
        let mut missing_requirements = Vec::new();
        let mut recommendations = Vec::new();
        for requirement in &self.requirements {
            if record.has_field(requirement.category, &requirement.field) {
                met += requirement.credits;
            } else {
                missing_requirements.push(requirement.name.clone());
                recommendations.push(format!(
                    "Report {} to satisfy {} under {}",
                    requirement.field, requirement.name, self.framework
                ));
            }
        }
        let total = self.total_credits();
        let score = if total == 0 {
            0.0
        } else {
            met as f64 / total as f64 * 100.0
        };
        ComplianceResult {
            framework: self.framework.clone(),
            status: ComplianceStatus::from_score(score),
            score,
            total_requirements: total,
            met_requirements: met,
            missing_requirements,
            recommendations,
        }
    }

    /// Look a built-in framework up by name, case-insensitive
    pub fn builtin(name: &str) -> Option<FrameworkRules> {
        match name.to_ascii_uppercase().as_str() {
            "GRI" => Some(Self::gri()),
            "SASB" => Some(Self::sasb()),
            "TCFD" => Some(Self::tcfd()),
            "CSRD" => Some(Self::csrd()),
            _ => None,
        }
    }

    /// Names of all built-in frameworks
    pub fn builtin_names() -> [&'static str; 4] {
        ["GRI", "SASB", "TCFD", "CSRD"]
    }

    /// GRI Standards. Emissions is the core disclosure and carries
    /// double credit.
    pub fn gri() -> Self {
        Self::new("GRI")
            .with_requirement(
                Requirement::new(
                    "GRI 305: GHG emissions disclosure",
                    EsgCategory::Environmental,
                    "emissions",
                )
                .with_credits(2),
            )
            .with_requirement(Requirement::new(
                "GRI 302: Energy consumption",
                EsgCategory::Environmental,
                "energy_consumption",
            ))
            .with_requirement(Requirement::new(
                "GRI 303: Water withdrawal",
                EsgCategory::Environmental,
                "water_usage",
            ))
            .with_requirement(Requirement::new(
                "GRI 306: Waste generated",
                EsgCategory::Environmental,
                "waste_generated",
            ))
            .with_requirement(Requirement::new(
                "GRI 2-7: Employee headcount",
                EsgCategory::Social,
                "employee_count",
            ))
            .with_requirement(Requirement::new(
                "GRI 404: Training hours",
                EsgCategory::Social,
                "training_hours",
            ))
            .with_requirement(Requirement::new(
                "GRI 405: Workforce diversity",
                EsgCategory::Social,
                "diversity_percent",
            ))
            .with_requirement(Requirement::new(
                "GRI 403: Work-related injuries",
                EsgCategory::Social,
                "injury_rate",
            ))
            .with_requirement(Requirement::new(
                "GRI 2-9: Board composition",
                EsgCategory::Governance,
                "board_size",
            ))
            .with_requirement(Requirement::new(
                "GRI 2-15: Independent oversight",
                EsgCategory::Governance,
                "independent_directors_percent",
            ))
            .with_requirement(Requirement::new(
                "GRI 205: Ethics incidents",
                EsgCategory::Governance,
                "ethics_violations",
            ))
    }

    /// SASB industry metrics
    pub fn sasb() -> Self {
        Self::new("SASB")
            .with_requirement(Requirement::new(
                "Greenhouse gas emissions",
                EsgCategory::Environmental,
                "emissions",
            ))
            .with_requirement(Requirement::new(
                "Energy management",
                EsgCategory::Environmental,
                "energy_consumption",
            ))
            .with_requirement(Requirement::new(
                "Water management",
                EsgCategory::Environmental,
                "water_usage",
            ))
            .with_requirement(Requirement::new(
                "Workforce headcount",
                EsgCategory::Social,
                "employee_count",
            ))
            .with_requirement(Requirement::new(
                "Employee health and safety",
                EsgCategory::Social,
                "injury_rate",
            ))
            .with_requirement(Requirement::new(
                "Employee turnover",
                EsgCategory::Social,
                "turnover_rate",
            ))
    }

    /// TCFD climate disclosures. Emissions metrics carry double credit.
    pub fn tcfd() -> Self {
        Self::new("TCFD")
            .with_requirement(
                Requirement::new(
                    "Metrics: Scope 1 and 2 emissions",
                    EsgCategory::Environmental,
                    "emissions",
                )
                .with_credits(2),
            )
            .with_requirement(Requirement::new(
                "Metrics: Energy mix",
                EsgCategory::Environmental,
                "renewable_energy_percent",
            ))
            .with_requirement(Requirement::new(
                "Metrics: Energy consumption",
                EsgCategory::Environmental,
                "energy_consumption",
            ))
            .with_requirement(Requirement::new(
                "Governance: Board climate oversight",
                EsgCategory::Governance,
                "board_size",
            ))
    }

    /// CSRD, via the ESRS topical standards. Climate carries double
    /// credit.
    pub fn csrd() -> Self {
        Self::new("CSRD")
            .with_requirement(
                Requirement::new(
                    "ESRS E1: Climate change",
                    EsgCategory::Environmental,
                    "emissions",
                )
                .with_credits(2),
            )
            .with_requirement(Requirement::new(
                "ESRS E1: Energy",
                EsgCategory::Environmental,
                "energy_consumption",
            ))
            .with_requirement(Requirement::new(
                "ESRS E3: Water",
                EsgCategory::Environmental,
                "water_usage",
            ))
            .with_requirement(Requirement::new(
                "ESRS E5: Circular economy",
                EsgCategory::Environmental,
                "waste_generated",
            ))
            .with_requirement(Requirement::new(
                "ESRS S1: Own workforce",
                EsgCategory::Social,
                "employee_count",
            ))
            .with_requirement(Requirement::new(
                "ESRS S1: Diversity",
                EsgCategory::Social,
                "diversity_percent",
            ))
            .with_requirement(Requirement::new(
                "ESRS S1: Training",
                EsgCategory::Social,
                "training_hours",
            ))
            .with_requirement(Requirement::new(
                "ESRS G1: Business conduct",
                EsgCategory::Governance,
                "ethics_violations",
            ))
            .with_requirement(Requirement::new(
                "ESRS G1: Board composition",
                EsgCategory::Governance,
                "board_size",
            ))
    }
}
