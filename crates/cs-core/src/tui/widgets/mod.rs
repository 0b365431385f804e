//! TUI widgets for the case explorer.
//!
//! # Widgets
//!
//! - `ChartView`: Stacked horizontal bar chart of the current layout
//! - `LegendPanel`: Series legend with the cursor highlight
//! - `StatusBar`: Bottom status line with mode and key hints
//! - `HelpOverlay`: Modal overlay listing keyboard shortcuts

mod chart_view;
mod help_overlay;
mod legend;
mod status_bar;

pub use chart_view::ChartView;
pub use help_overlay::HelpOverlay;
pub use legend::LegendPanel;
pub use status_bar::{StatusBar, StatusMode};
