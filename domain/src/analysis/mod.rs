//! Analysis domain module
//!
//! Category weighting and the report that rolls every branch result
//! into one document.

pub mod report;
pub mod weights;

pub use report::AnalysisReport;
pub use weights::ScoreWeights;
