//! Console output formatter for analysis results

use crate::output::formatter::ReportFormatter;
use colored::{ColoredString, Colorize};
use esg_domain::{
    AnalysisReport, CategoryInsight, ComplianceStatus, QualityDimension, ValidationResult,
};

/// Formats analysis results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete analysis report
    pub fn format(report: &AnalysisReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("ESG Analysis Report"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Overall score:".cyan().bold(),
            Self::score(report.overall_score)
        ));

        // Category insights
        output.push_str(&Self::section_header("Category Scores"));
        output.push_str(&Self::category_line("Environmental", &report.environmental));
        output.push_str(&Self::category_line("Social", &report.social));
        output.push_str(&Self::category_line("Governance", &report.governance));

        // Compliance
        output.push_str(&Self::section_header("Compliance"));
        output.push_str(&format!(
            "{} {} ({:.1}%, {}/{} requirements met)\n",
            "Overall:".bold(),
            Self::status(report.compliance.status),
            report.compliance.overall_score,
            report.compliance.met_requirements,
            report.compliance.total_requirements
        ));
        for result in &report.compliance.frameworks {
            output.push_str(&format!(
                "  {} {} ({}/{} met)\n",
                format!("{:<6}", result.framework).yellow().bold(),
                Self::status(result.status),
                result.met_requirements,
                result.total_requirements
            ));
            for missing in &result.missing_requirements {
                output.push_str(&format!("    {} {}\n", "missing:".dimmed(), missing));
            }
        }

        // Validation
        output.push_str(&Self::section_header("Data Validation"));
        output.push_str(&Self::validation_body(&report.validation));

        // Insights
        if !report.insights.is_empty() {
            output.push_str(&Self::section_header("Insights"));
            for insight in &report.insights {
                output.push_str(&format!("  * {insight}\n"));
            }
        }

        // Recommendations
        if !report.recommendations.is_empty() {
            output.push_str(&Self::section_header("Recommendations"));
            for recommendation in &report.recommendations {
                output.push_str(&format!("  * {recommendation}\n"));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(report: &AnalysisReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format headline scores and recommendations only
    pub fn format_summary(report: &AnalysisReport) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== ESG Analysis ===".cyan().bold()));
        output.push_str(&format!(
            "{} {}\n",
            "Overall:".bold(),
            Self::score(report.overall_score)
        ));
        output.push_str(&format!(
            "{} E {}  S {}  G {}\n",
            "Categories:".dimmed(),
            Self::score(report.environmental.score),
            Self::score(report.social.score),
            Self::score(report.governance.score)
        ));
        output.push_str(&format!(
            "{} {} ({:.1}%)\n",
            "Compliance:".dimmed(),
            Self::status(report.compliance.status),
            report.compliance.overall_score
        ));
        output.push_str(&format!(
            "{} {} (score {})\n",
            "Validation:".dimmed(),
            if report.validation.is_valid {
                "passed".green().to_string()
            } else {
                "failed".red().to_string()
            },
            Self::score(report.validation.score)
        ));

        if !report.recommendations.is_empty() {
            output.push_str(&format!("\n{}\n", "Recommendations:".cyan().bold()));
            for recommendation in &report.recommendations {
                output.push_str(&format!("  * {recommendation}\n"));
            }
        }

        output
    }

    /// Format a standalone validation result
    pub fn format_validation(result: &ValidationResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Data Validation"));
        output.push('\n');
        output.push_str(&Self::validation_body(result));

        if !result.recommendations.is_empty() {
            output.push_str(&format!("\n{}\n", "Recommendations:".cyan().bold()));
            for recommendation in &result.recommendations {
                output.push_str(&format!("  * {recommendation}\n"));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format a standalone validation result as JSON
    pub fn format_validation_json(result: &ValidationResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// One-line summary of a standalone validation result
    pub fn format_validation_summary(result: &ValidationResult) -> String {
        format!(
            "{} (score {}, {} errors, {} warnings, {} anomalies)\n",
            if result.is_valid {
                "passed".green().bold().to_string()
            } else {
                "failed".red().bold().to_string()
            },
            Self::score(result.score),
            result.errors.len(),
            result.warnings.len(),
            result.anomalies.len()
        )
    }

    fn validation_body(result: &ValidationResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {} (score {})\n",
            "Verdict:".bold(),
            if result.is_valid {
                "passed".green().to_string()
            } else {
                "failed".red().to_string()
            },
            Self::score(result.score)
        ));

        output.push_str(&format!(
            "  {} completeness {:.0}%, accuracy {:.0}%, consistency {:.0}%, timeliness {:.0}%\n",
            "Quality:".dimmed(),
            result.data_quality.completeness,
            result.data_quality.accuracy,
            result.data_quality.consistency,
            result.data_quality.timeliness
        ));
        output.push_str(&format!(
            "  {} {}\n",
            "Weakest dimension:".dimmed(),
            Self::dimension_name(result.data_quality.weakest_dimension())
        ));

        for error in &result.errors {
            output.push_str(&format!("  {} {error}\n", "error:".red().bold()));
        }
        for warning in &result.warnings {
            output.push_str(&format!("  {} {warning}\n", "warning:".yellow()));
        }
        for anomaly in &result.anomalies {
            output.push_str(&format!(
                "  {} [{}] {} - {}\n",
                "anomaly:".yellow().bold(),
                anomaly.severity.as_str(),
                anomaly.field,
                anomaly.description
            ));
        }

        output
    }

    fn category_line(name: &str, insight: &CategoryInsight) -> String {
        format!(
            "  {} {} (confidence {:.0}%)\n",
            format!("{name:<13}").yellow().bold(),
            Self::score(insight.score),
            insight.confidence
        )
    }

    fn dimension_name(dimension: QualityDimension) -> &'static str {
        match dimension {
            QualityDimension::Completeness => "completeness",
            QualityDimension::Accuracy => "accuracy",
            QualityDimension::Consistency => "consistency",
            QualityDimension::Timeliness => "timeliness",
        }
    }

    fn score(score: f64) -> ColoredString {
        let text = format!("{score:.1}");
        if score >= 70.0 {
            text.green()
        } else if score >= 40.0 {
            text.yellow()
        } else {
            text.red()
        }
    }

    fn status(status: ComplianceStatus) -> ColoredString {
        match status {
            ComplianceStatus::Compliant => status.display_name().green(),
            ComplianceStatus::PartiallyCompliant => status.display_name().yellow(),
            ComplianceStatus::NonCompliant => status.display_name().red(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl ReportFormatter for ConsoleFormatter {
    fn format(&self, report: &AnalysisReport) -> String {
        Self::format(report)
    }

    fn format_json(&self, report: &AnalysisReport) -> String {
        Self::format_json(report)
    }

    fn format_summary(&self, report: &AnalysisReport) -> String {
        Self::format_summary(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esg_domain::{ComplianceSummary, EsgCategory, EsgRecord, FrameworkRules, ScoreWeights};

    fn sample_report() -> AnalysisReport {
        let record = EsgRecord::new()
            .with_field(EsgCategory::Environmental, "emissions", 125_000.0)
            .with_field(EsgCategory::Social, "employee_count", 4_000.0);
        let compliance = ComplianceSummary::from_results(vec![
            FrameworkRules::gri().evaluate(&record),
            FrameworkRules::sasb().evaluate(&record),
        ]);

        AnalysisReport::aggregate(
            &ScoreWeights::default(),
            CategoryInsight::new(72.0, 90.0).with_insight("Emissions reported"),
            CategoryInsight::new(55.0, 90.0).with_recommendation("Report turnover rate"),
            CategoryInsight::new(40.0, 40.0),
            compliance,
            ValidationResult::default(),
        )
    }

    #[test]
    fn test_full_format_names_every_section() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format(&sample_report());
        assert!(text.contains("ESG Analysis Report"));
        assert!(text.contains("Category Scores"));
        assert!(text.contains("Environmental"));
        assert!(text.contains("Compliance"));
        assert!(text.contains("GRI"));
        assert!(text.contains("Data Validation"));
        assert!(text.contains("Recommendations"));
        assert!(text.contains("Report turnover rate"));
    }

    #[test]
    fn test_summary_is_shorter_than_full() {
        colored::control::set_override(false);
        let report = sample_report();
        let full = ConsoleFormatter::format(&report);
        let summary = ConsoleFormatter::format_summary(&report);
        assert!(summary.len() < full.len());
        assert!(summary.contains("Overall:"));
    }

    #[test]
    fn test_json_round_trips() {
        let report = sample_report();
        let json = ConsoleFormatter::format_json(&report);
        let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.overall_score, report.overall_score);
    }

    #[test]
    fn test_validation_format_shows_verdict_and_quality() {
        colored::control::set_override(false);
        let mut result = ValidationResult::default();
        result.is_valid = true;
        result.score = 85.0;
        result.warnings.push("board_size is unusually small".to_string());

        let text = ConsoleFormatter::format_validation(&result);
        assert!(text.contains("passed"));
        assert!(text.contains("warning:"));
        assert!(text.contains("board_size"));
    }

    #[test]
    fn test_validation_summary_counts() {
        colored::control::set_override(false);
        let mut result = ValidationResult::default();
        result.errors.push("no data".to_string());

        let line = ConsoleFormatter::format_validation_summary(&result);
        assert!(line.contains("failed"));
        assert!(line.contains("1 errors"));
    }
}
