//! Chart rendering configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

/// Margins around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for Margins {
    fn default() -> Self {
        Margins {
            top: 20,
            right: 30,
            bottom: 40,
            left: 40,
        }
    }
}

/// Chart geometry and styling knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Total SVG width in pixels.
    pub width: u32,
    /// Total SVG height in pixels.
    pub height: u32,
    pub margins: Margins,
    /// Fraction of each band step left as padding between bars.
    pub band_padding: f64,
    /// Resting fill opacity for bar segments.
    pub fill_opacity: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            width: 1000,
            height: 600,
            margins: Margins::default(),
            band_padding: 0.1,
            fill_opacity: 0.85,
        }
    }
}

impl ChartConfig {
    /// Width of the plot area between the left and right margins.
    pub fn inner_width(&self) -> f64 {
        f64::from(self.width) - f64::from(self.margins.left) - f64::from(self.margins.right)
    }

    /// Height of the plot area between the top and bottom margins.
    pub fn inner_height(&self) -> f64 {
        f64::from(self.height) - f64::from(self.margins.top) - f64::from(self.margins.bottom)
    }

    /// Reject geometry that cannot produce a drawable plot area.
    pub fn validate(&self) -> Result<()> {
        if self.inner_width() <= 0.0 || self.inner_height() <= 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "margins leave no plot area ({}x{} inside {}x{})",
                self.inner_width(),
                self.inner_height(),
                self.width,
                self.height
            )));
        }
        if !(0.0..1.0).contains(&self.band_padding) {
            return Err(ChartError::InvalidConfig(format!(
                "band_padding must be in [0, 1), got {}",
                self.band_padding
            )));
        }
        if !(0.0..=1.0).contains(&self.fill_opacity) {
            return Err(ChartError::InvalidConfig(format!(
                "fill_opacity must be in [0, 1], got {}",
                self.fill_opacity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = ChartConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.inner_width(), 930.0);
        assert_eq!(config.inner_height(), 540.0);
    }

    #[test]
    fn rejects_degenerate_geometry() {
        let config = ChartConfig {
            width: 50,
            margins: Margins {
                left: 40,
                right: 40,
                ..Margins::default()
            },
            ..ChartConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_padding_and_opacity() {
        let bad_padding = ChartConfig {
            band_padding: 1.0,
            ..ChartConfig::default()
        };
        assert!(bad_padding.validate().is_err());

        let bad_opacity = ChartConfig {
            fill_opacity: 1.5,
            ..ChartConfig::default()
        };
        assert!(bad_opacity.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: ChartConfig = serde_json::from_str(r#"{"width": 800}"#).unwrap();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
        assert_eq!(config.margins.left, 40);
    }
}
