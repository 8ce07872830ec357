//! Output formatter trait

use esg_domain::AnalysisReport;

/// Trait for formatting analysis reports
pub trait ReportFormatter {
    /// Format the complete report
    fn format(&self, report: &AnalysisReport) -> String;

    /// Format as JSON
    fn format_json(&self, report: &AnalysisReport) -> String;

    /// Format headline scores and recommendations only
    fn format_summary(&self, report: &AnalysisReport) -> String;
}
