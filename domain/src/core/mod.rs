//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: character-aware text helpers
//! - [`duration`]: millisecond serde encoding for durations

pub mod duration;
pub mod error;
pub mod string;
