//! Analysis task entities

use super::value_objects::TaskId;
use crate::analysis::report::AnalysisReport;
use crate::compliance::entities::ComplianceSummary;
use crate::core::record::EsgRecord;
use crate::validation::result::ValidationResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of work a submitted task requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Full analysis: category scoring, compliance and validation
    DataAnalysis,
    /// Compliance checking only
    ComplianceCheck,
    /// Data validation only
    Validation,
    /// Full analysis packaged as a report
    ReportGeneration,
}

impl TaskKind {
    pub fn as_str(&self) -> &str {
        match self {
            TaskKind::DataAnalysis => "data_analysis",
            TaskKind::ComplianceCheck => "compliance_check",
            TaskKind::Validation => "validation",
            TaskKind::ReportGeneration => "report_generation",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            TaskKind::DataAnalysis => "Data Analysis",
            TaskKind::ComplianceCheck => "Compliance Check",
            TaskKind::Validation => "Validation",
            TaskKind::ReportGeneration => "Report Generation",
        }
    }

    /// Check if this kind runs the full analysis pipeline rather than a
    /// single branch
    pub fn runs_full_analysis(&self) -> bool {
        matches!(self, TaskKind::DataAnalysis | TaskKind::ReportGeneration)
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scheduling hint attached to a task
///
/// Priority is carried through the pipeline and reported back with the
/// task, but dispatch order itself is submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Normal,
    High,
    Critical,
}

impl TaskPriority {
    pub fn as_str(&self) -> &str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Normal => "normal",
            TaskPriority::High => "high",
            TaskPriority::Critical => "critical",
        }
    }
}

/// Status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is queued and waiting to be picked up
    #[default]
    Pending,
    /// Task is currently being analyzed
    Processing,
    /// Task completed successfully
    Completed,
    /// Task failed
    Failed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Processing => "processing",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result payload of a finished task, shaped by the task kind
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskOutput {
    Analysis(AnalysisReport),
    Compliance(ComplianceSummary),
    Validation(ValidationResult),
}

impl TaskOutput {
    pub fn as_analysis(&self) -> Option<&AnalysisReport> {
        match self {
            TaskOutput::Analysis(report) => Some(report),
            _ => None,
        }
    }

    pub fn as_compliance(&self) -> Option<&ComplianceSummary> {
        match self {
            TaskOutput::Compliance(summary) => Some(summary),
            _ => None,
        }
    }

    pub fn as_validation(&self) -> Option<&ValidationResult> {
        match self {
            TaskOutput::Validation(result) => Some(result),
            _ => None,
        }
    }

    /// Headline score of the output, whatever its shape
    pub fn headline_score(&self) -> f64 {
        match self {
            TaskOutput::Analysis(report) => report.overall_score,
            TaskOutput::Compliance(summary) => summary.overall_score,
            TaskOutput::Validation(result) => result.score,
        }
    }
}

/// A submitted unit of analysis work (Entity).
///
/// The status moves forward only: `Pending` to `Processing` to either
/// `Completed` or `Failed`. Transition methods are guarded and return
/// whether the transition was applied, so a late writer racing against
/// an already-terminal task becomes a no-op instead of an overwrite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentTask {
    /// Unique identifier for this task
    pub id: TaskId,
    /// What kind of analysis was requested
    pub kind: TaskKind,
    /// The record to analyze
    pub payload: EsgRecord,
    /// Scheduling hint
    pub priority: TaskPriority,
    /// Current status
    pub status: TaskStatus,
    /// Result of the analysis (set on completion)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TaskOutput>,
    /// Error description (set on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// When the task was submitted
    pub created_at: DateTime<Utc>,
    /// When the task reached a terminal status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl AgentTask {
    pub fn new(kind: TaskKind, payload: EsgRecord) -> Self {
        Self {
            id: TaskId::generate(),
            kind,
            payload,
            priority: TaskPriority::default(),
            status: TaskStatus::Pending,
            result: None,
            error: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_id(mut self, id: impl Into<TaskId>) -> Self {
        self.id = id.into();
        self
    }

    /// Move the task from `Pending` to `Processing`.
    ///
    /// Returns `false` without modifying the task if it is not pending.
    pub fn begin_processing(&mut self) -> bool {
        if self.status != TaskStatus::Pending {
            return false;
        }
        self.status = TaskStatus::Processing;
        true
    }

    /// Move the task from `Processing` to `Completed`, attaching its output.
    ///
    /// Returns `false` without modifying the task if it is not processing.
    pub fn complete(&mut self, output: TaskOutput) -> bool {
        if self.status != TaskStatus::Processing {
            return false;
        }
        self.status = TaskStatus::Completed;
        self.result = Some(output);
        self.completed_at = Some(Utc::now());
        true
    }

    /// Move the task to `Failed`, recording the error.
    ///
    /// Allowed from `Pending` (a task that could not be dispatched) as well
    /// as `Processing`. Returns `false` if the task is already terminal.
    pub fn fail(&mut self, error: impl Into<String>) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = TaskStatus::Failed;
        self.error = Some(error.into());
        self.completed_at = Some(Utc::now());
        true
    }

    /// Returns `true` if the task reached a terminal status.
    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    /// Wall-clock time between submission and completion, if finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.completed_at.map(|done| done - self.created_at)
    }
}
