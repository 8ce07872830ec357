//! Task domain module
//!
//! Contains the task entity submitted to the orchestrator, its lifecycle
//! states and the result payloads a finished task carries.

pub mod entities;
pub mod value_objects;

pub use entities::{AgentTask, TaskKind, TaskOutput, TaskPriority, TaskStatus};
pub use value_objects::TaskId;
