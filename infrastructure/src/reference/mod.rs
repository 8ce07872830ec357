//! Reference baseline sources
//!
//! Baselines are optional everywhere: a source may report that it has
//! none, and the validation engine then falls back to its
//! distribution-free outlier checks.

mod static_source;
mod toml_source;

pub use static_source::StaticReferenceSource;
pub use toml_source::TomlReferenceSource;
