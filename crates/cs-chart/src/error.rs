//! Error types for chart rendering.

use thiserror::Error;

/// Result type for chart operations.
pub type Result<T> = std::result::Result<T, ChartError>;

/// Errors that can occur while rendering a chart.
///
/// Rendering itself is pure string building; writing the output to disk
/// is the caller's concern, so the only failure mode is bad geometry.
#[derive(Error, Debug)]
pub enum ChartError {
    /// Invalid configuration.
    #[error("invalid chart configuration: {0}")]
    InvalidConfig(String),
}
