//! Audit trail sinks

mod jsonl;

pub use jsonl::JsonlAuditSink;
