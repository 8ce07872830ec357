//! In-memory task registry
//!
//! Tracks every submitted task for the lifetime of the process. All
//! writes go through guarded transitions on [`AgentTask`], so a racing
//! writer that arrives after a task turned terminal changes nothing and
//! is told so. Locks are held only for the map operation itself, never
//! across an await point.

use esg_domain::{AgentTask, TaskId, TaskOutput, TaskStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Per-status task counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
    pub failed: usize,
}

impl RegistryStats {
    pub fn total(&self) -> usize {
        self.pending + self.processing + self.completed + self.failed
    }
}

/// Shared registry of all tasks the orchestrator has seen
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: RwLock<HashMap<TaskId, AgentTask>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<TaskId, AgentTask>> {
        self.tasks
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<TaskId, AgentTask>> {
        self.tasks
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add a new task. Returns `false` if the id is already taken.
    pub fn register(&self, task: AgentTask) -> bool {
        let mut tasks = self.write();
        if tasks.contains_key(&task.id) {
            return false;
        }
        tasks.insert(task.id.clone(), task);
        true
    }

    /// Snapshot of one task
    pub fn get(&self, id: &TaskId) -> Option<AgentTask> {
        self.read().get(id).cloned()
    }

    pub fn status(&self, id: &TaskId) -> Option<TaskStatus> {
        self.read().get(id).map(|task| task.status)
    }

    /// Move a task from pending to processing. Returns `false` if the
    /// task is unknown or not pending.
    pub fn begin(&self, id: &TaskId) -> bool {
        self.write()
            .get_mut(id)
            .is_some_and(|task| task.begin_processing())
    }

    /// Complete a processing task with its output. No-op on tasks that
    /// are not processing; returns whether the write was applied.
    pub fn complete(&self, id: &TaskId, output: TaskOutput) -> bool {
        self.write().get_mut(id).is_some_and(|task| task.complete(output))
    }

    /// Fail a non-terminal task. No-op on terminal tasks; returns
    /// whether the write was applied.
    pub fn fail(&self, id: &TaskId, error: impl Into<String>) -> bool {
        self.write().get_mut(id).is_some_and(|task| task.fail(error))
    }

    pub fn task_count(&self) -> usize {
        self.read().len()
    }

    /// Snapshot of all tasks, newest first
    pub fn tasks(&self) -> Vec<AgentTask> {
        let mut tasks: Vec<AgentTask> = self.read().values().cloned().collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tasks
    }

    pub fn stats(&self) -> RegistryStats {
        let tasks = self.read();
        let mut stats = RegistryStats::default();
        for task in tasks.values() {
            match task.status {
                TaskStatus::Pending => stats.pending += 1,
                TaskStatus::Processing => stats.processing += 1,
                TaskStatus::Completed => stats.completed += 1,
                TaskStatus::Failed => stats.failed += 1,
            }
        }
        stats
    }
}
