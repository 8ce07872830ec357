//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`OrchestratorParams`] — pipeline control (queue depth, concurrency,
//!   classifier patience)

pub mod orchestrator_params;

pub use orchestrator_params::OrchestratorParams;
