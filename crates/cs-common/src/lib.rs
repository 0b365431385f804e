//! casestack common types.
//!
//! This crate provides the foundational types shared across casestack
//! crates:
//! - The surgical case record as loaded from the input CSV
//! - Output format and sort order enums for the CLI surface

pub mod output;
pub mod record;

pub use output::{OutputFormat, SortOrder};
pub use record::CaseRecord;
