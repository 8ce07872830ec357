//! Audit trail port
//!
//! Analysis decisions about other people's data deserve a durable trail.
//! Every task transition and every degraded-mode decision is offered to
//! the sink; sinks must never fail the analysis, so recording is
//! infallible from the caller's point of view.

use chrono::{DateTime, Utc};
use esg_domain::{TaskId, TaskKind};
use serde::{Deserialize, Serialize};

/// What happened, for the audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    TaskSubmitted,
    TaskStarted,
    TaskCompleted,
    TaskFailed,
    FallbackUsed,
    ValidationRun,
}

impl AuditAction {
    pub fn as_str(&self) -> &str {
        match self {
            AuditAction::TaskSubmitted => "task_submitted",
            AuditAction::TaskStarted => "task_started",
            AuditAction::TaskCompleted => "task_completed",
            AuditAction::TaskFailed => "task_failed",
            AuditAction::FallbackUsed => "fallback_used",
            AuditAction::ValidationRun => "validation_run",
        }
    }
}

/// One audit trail entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<TaskKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AuditEvent {
    pub fn new(action: AuditAction) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            task_id: None,
            kind: None,
            detail: None,
        }
    }

    pub fn for_task(action: AuditAction, task_id: &TaskId, kind: TaskKind) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            task_id: Some(task_id.clone()),
            kind: Some(kind),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Receives audit events
///
/// Implementations live in the infrastructure layer. A sink that cannot
/// write must swallow the problem (logging it) rather than surface it.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: AuditEvent);
}

/// Sink that drops every event
pub struct NoAudit;

impl AuditSink for NoAudit {
    fn record(&self, _event: AuditEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_skips_empty_fields() {
        let event = AuditEvent::new(AuditAction::ValidationRun);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"action\":\"validation_run\""));
        assert!(!json.contains("task_id"));
        assert!(!json.contains("detail"));
    }

    #[test]
    fn test_for_task_carries_identity() {
        let id = TaskId::new("task-7");
        let event = AuditEvent::for_task(AuditAction::TaskCompleted, &id, TaskKind::DataAnalysis)
            .with_detail("score 82.5");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("task-7"));
        assert!(json.contains("data_analysis"));
        assert!(json.contains("score 82.5"));
    }
}
