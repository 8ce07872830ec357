//! Progress notification port
//!
//! Defines the interface for reporting progress while a task moves
//! through the analysis pipeline.

use esg_domain::{EsgCategory, TaskId, TaskKind, TaskStatus};

/// A concurrent branch of one analysis run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisBranch {
    /// Per-category insight scoring
    Insight(EsgCategory),
    Compliance,
    Validation,
}

impl AnalysisBranch {
    pub fn as_str(&self) -> &str {
        match self {
            AnalysisBranch::Insight(EsgCategory::Environmental) => "insight:environmental",
            AnalysisBranch::Insight(EsgCategory::Social) => "insight:social",
            AnalysisBranch::Insight(EsgCategory::Governance) => "insight:governance",
            AnalysisBranch::Compliance => "compliance",
            AnalysisBranch::Validation => "validation",
        }
    }
}

impl std::fmt::Display for AnalysisBranch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Callback for progress updates during task analysis
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, progress bars, etc.)
pub trait AnalysisProgressNotifier: Send + Sync {
    /// Called when a task leaves the queue and analysis begins
    fn on_task_start(&self, task_id: &TaskId, kind: TaskKind, branch_count: usize);

    /// Called when one branch of the analysis finishes
    fn on_branch_complete(&self, task_id: &TaskId, branch: AnalysisBranch, success: bool);

    /// Called when a classifier call is replaced by the heuristic fallback
    fn on_fallback(&self, task_id: &TaskId, category: EsgCategory) {
        let _ = (task_id, category);
    }

    /// Called when the task reaches a terminal status
    fn on_task_complete(&self, task_id: &TaskId, status: TaskStatus);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl AnalysisProgressNotifier for NoProgress {
    fn on_task_start(&self, _task_id: &TaskId, _kind: TaskKind, _branch_count: usize) {}
    fn on_branch_complete(&self, _task_id: &TaskId, _branch: AnalysisBranch, _success: bool) {}
    fn on_task_complete(&self, _task_id: &TaskId, _status: TaskStatus) {}
}
