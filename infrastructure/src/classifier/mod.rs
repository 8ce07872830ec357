//! Insight classifier adapters
//!
//! Two backends sit behind the classifier port: a deterministic local
//! one, and an HTTP one behind the `http-classifier` feature. Either
//! way, the pipeline survives the backend failing; the heuristic
//! fallback answers whenever a classify call errs.

#[cfg(feature = "http-classifier")]
mod http;
mod local;

#[cfg(feature = "http-classifier")]
pub use http::HttpInsightClassifier;
pub use local::LocalInsightClassifier;
