//! Insight domain module
//!
//! Per-category scoring results and the deterministic fallback scorer
//! used when the classifier backend is unavailable.

pub mod fallback;
pub mod value_objects;

pub use fallback::FallbackScorer;
pub use value_objects::CategoryInsight;
