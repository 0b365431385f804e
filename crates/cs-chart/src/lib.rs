//! casestack chart renderer.
//!
//! Turns a [`cs_stack::StackLayout`] into a standalone SVG stacked-bar
//! chart, or a full HTML page embedding the chart next to a summary
//! block. Rendering is pure: the generator holds only configuration and
//! every call derives its output from the layout it is handed.

pub mod config;
pub mod error;
pub mod palette;
pub mod scale;
pub mod svg;

pub use config::{ChartConfig, Margins};
pub use error::{ChartError, Result};
pub use palette::{series_color, Rgb, CHART_PALETTE};
pub use scale::{BandScale, LinearScale};
pub use svg::{BinLine, ChartGenerator, StatsBlock};
