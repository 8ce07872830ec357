//! Core domain concepts shared across all subdomains.
//!
//! - [`record::EsgRecord`] — an ESG dataset submission keyed by category
//! - [`record::EsgCategory`] — the environmental/social/governance axes
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod record;
