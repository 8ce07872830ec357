//! Task identifier value objects

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide sequence so that tasks created in the same millisecond
/// still receive distinct identifiers.
static TASK_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Unique identifier for a submitted task (Value Object)
///
/// # Example
///
/// ```
/// use esg_domain::TaskId;
///
/// let a = TaskId::generate();
/// let b = TaskId::generate();
/// assert_ne!(a, b);
/// assert!(a.as_str().starts_with("task-"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new identifier from the current time plus an atomic
    /// sequence number. The timestamp keeps identifiers readable and
    /// roughly sortable; the sequence guarantees uniqueness when many
    /// tasks are submitted concurrently.
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
        let seq = TASK_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self(format!("task-{millis:x}-{seq:06x}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_task_id_from_string() {
        let id = TaskId::new("task-42");
        assert_eq!(id.as_str(), "task-42");
        assert_eq!(id.to_string(), "task-42");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: HashSet<TaskId> = (0..1000).map(|_| TaskId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_generated_ids_are_unique_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                std::thread::spawn(|| (0..250).map(|_| TaskId::generate()).collect::<Vec<_>>())
            })
            .collect();

        let mut all = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(all.insert(id));
            }
        }
        assert_eq!(all.len(), 2000);
    }
}
