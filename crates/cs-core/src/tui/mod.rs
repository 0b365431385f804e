//! Interactive terminal explorer for the stacked case chart.
//!
//! This module provides a terminal front-end for browsing case records
//! as a stacked bar chart. It is built on ftui's Elm-style runtime with
//! custom widgets for the chart, legend, and status bar.
//!
//! # Features
//!
//! - Stacked bar chart of case counts per age bin
//! - Series cursor for highlighting one operation type
//! - Drill-down into a single operation type (counts per operation)
//! - Reset back to the overview
//! - Help overlay with keyboard shortcuts
//!
//! # Module Structure
//!
//! - `app`: Main application model and update loop
//! - `widgets`: Chart, legend, status bar, and help overlay widgets
//! - `theme`: Color schemes and styling
//! - `events`: Key bindings
//! - `layout`: Responsive breakpoint-based layout

mod app;
mod events;
pub mod layout;
mod msg;
mod theme;
pub mod widgets;

pub use app::{run_tui, App, AppState};
pub use events::KeyBindings;
pub use layout::{Breakpoint, ExplorerAreas, LayoutState, ResponsiveLayout};
pub use msg::Msg;
pub use theme::{Theme, ThemeMode};

use thiserror::Error;

/// Errors that can occur in the TUI module.
#[derive(Error, Debug)]
pub enum TuiError {
    /// Failed to initialize terminal.
    #[error("terminal initialization failed: {0}")]
    TerminalInit(String),

    /// The event loop failed after startup.
    #[error("terminal event loop failed: {0}")]
    Runtime(String),
}

/// Result type for TUI operations.
pub type TuiResult<T> = Result<T, TuiError>;
