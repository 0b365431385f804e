//! casestack Core Library
//!
//! This library provides the core functionality for the case-record
//! explorer:
//! - Exit codes for CLI operations
//! - Configuration loading and validation
//! - CSV case-record loading and validation
//! - Summary statistics over loaded records
//! - Drill-down explorer session state
//!
//! The binary entry point is in `main.rs`.

pub mod config;
pub mod exit_codes;
pub mod loader;
pub mod logging;
pub mod session;
pub mod stats;

// TUI module (optional, behind "ui" feature)
#[cfg(feature = "ui")]
pub mod tui;
