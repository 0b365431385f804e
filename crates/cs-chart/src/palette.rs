//! Series color palette.

use serde::{Deserialize, Serialize};

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// `#rrggbb` form for SVG/CSS attributes.
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// The fixed 11-color palette, in source order.
pub const CHART_PALETTE: [Rgb; 11] = [
    Rgb::new(0xE6, 0x39, 0x46),
    Rgb::new(0xF4, 0xA2, 0x61),
    Rgb::new(0x2A, 0x9D, 0x8F),
    Rgb::new(0x26, 0x46, 0x53),
    Rgb::new(0xE9, 0xC4, 0x6A),
    Rgb::new(0xA2, 0x3E, 0x48),
    Rgb::new(0x45, 0x7B, 0x9D),
    Rgb::new(0x1D, 0x35, 0x57),
    Rgb::new(0x6A, 0x05, 0x72),
    Rgb::new(0xFF, 0xB4, 0x00),
    Rgb::new(0x4E, 0xCD, 0xC4),
];

/// Color for the series at stack position `index`.
///
/// Assignment walks the palette in reverse and wraps when there are
/// more series than colors, so a given stack position always maps to
/// the same color across renders.
pub fn series_color(index: usize) -> Rgb {
    let n = CHART_PALETTE.len();
    CHART_PALETTE[n - 1 - (index % n)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_uppercase_rrggbb() {
        assert_eq!(Rgb::new(0xE6, 0x39, 0x46).hex(), "#E63946");
        assert_eq!(Rgb::new(0, 0, 0).hex(), "#000000");
    }

    #[test]
    fn colors_assigned_from_reversed_palette() {
        assert_eq!(series_color(0), CHART_PALETTE[10]);
        assert_eq!(series_color(1), CHART_PALETTE[9]);
        assert_eq!(series_color(10), CHART_PALETTE[0]);
    }

    #[test]
    fn palette_wraps_past_eleven_series() {
        assert_eq!(series_color(11), series_color(0));
        assert_eq!(series_color(23), series_color(1));
    }
}
