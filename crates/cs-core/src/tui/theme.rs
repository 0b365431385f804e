//! Theme and styling for the explorer TUI.
//!
//! Provides consistent colors and styles across all widgets using ftui's
//! Theme/StyleSheet system with WCAG accessibility validation. Bar
//! segment colors come from the shared chart palette so the terminal
//! view matches the rendered SVG.

use cs_chart::series_color;
use ftui::style::{
    contrast_ratio, meets_wcag_aa, meets_wcag_aaa, ColorProfile, Rgb as FtuiRgb, StyleSheet,
    Theme as FtuiTheme, ThemeBuilder,
};
use ftui::PackedRgba;
use ftui::Style as FtuiStyle;

/// Theme mode selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    /// Light theme for high ambient light.
    Light,
    /// Dark theme (default).
    #[default]
    Dark,
    /// High contrast for accessibility (WCAG AAA).
    HighContrast,
    /// No color — respects `NO_COLOR` environment variable.
    NoColor,
}

/// Base RGB colors used for WCAG validation.
#[derive(Debug, Clone)]
struct BaseColors {
    fg: FtuiRgb,
    bg: FtuiRgb,
    highlight: FtuiRgb,
    muted: FtuiRgb,
}

/// Theme configuration for the TUI.
///
/// Wraps ftui's `Theme` and `StyleSheet` plus the series palette used by
/// the chart and legend widgets.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Current theme mode.
    pub mode: ThemeMode,

    ftui_theme: FtuiTheme,
    stylesheet: StyleSheet,
    base: BaseColors,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_env()
    }
}

// Dark theme base colors
const DARK_BG: FtuiRgb = FtuiRgb::new(30, 30, 30);
const DARK_FG: FtuiRgb = FtuiRgb::new(220, 220, 220);
const DARK_HIGHLIGHT: FtuiRgb = FtuiRgb::new(0, 200, 200);
const DARK_MUTED: FtuiRgb = FtuiRgb::new(128, 128, 128);
const DARK_ERROR: FtuiRgb = FtuiRgb::new(255, 80, 80);
const DARK_WARNING: FtuiRgb = FtuiRgb::new(255, 200, 50);
const DARK_SUCCESS: FtuiRgb = FtuiRgb::new(80, 220, 80);
const DARK_BORDER: FtuiRgb = FtuiRgb::new(80, 80, 80);

// Light theme base colors
const LIGHT_BG: FtuiRgb = FtuiRgb::new(255, 255, 255);
const LIGHT_FG: FtuiRgb = FtuiRgb::new(30, 30, 30);
const LIGHT_HIGHLIGHT: FtuiRgb = FtuiRgb::new(0, 80, 200);
const LIGHT_MUTED: FtuiRgb = FtuiRgb::new(110, 110, 110);
const LIGHT_ERROR: FtuiRgb = FtuiRgb::new(200, 0, 0);
const LIGHT_WARNING: FtuiRgb = FtuiRgb::new(140, 100, 0);
const LIGHT_SUCCESS: FtuiRgb = FtuiRgb::new(0, 128, 0);
const LIGHT_BORDER: FtuiRgb = FtuiRgb::new(180, 180, 180);

// High contrast base colors (WCAG AAA: 7:1 minimum)
const HC_BG: FtuiRgb = FtuiRgb::new(0, 0, 0);
const HC_FG: FtuiRgb = FtuiRgb::new(255, 255, 255);
const HC_HIGHLIGHT: FtuiRgb = FtuiRgb::new(255, 255, 0);
const HC_MUTED: FtuiRgb = FtuiRgb::new(200, 200, 200);
const HC_ERROR: FtuiRgb = FtuiRgb::new(255, 100, 100);
const HC_WARNING: FtuiRgb = FtuiRgb::new(255, 255, 80);
const HC_SUCCESS: FtuiRgb = FtuiRgb::new(100, 255, 100);
const HC_BORDER: FtuiRgb = FtuiRgb::new(255, 255, 255);

impl Theme {
    /// Auto-detect theme from environment variables.
    ///
    /// Priority:
    /// 1. `NO_COLOR` set → NoColor theme
    /// 2. `CASESTACK_HIGH_CONTRAST` set → HighContrast theme
    /// 3. Default → Dark theme
    pub fn from_env() -> Self {
        if std::env::var("NO_COLOR").is_ok() {
            return Self::no_color();
        }
        if std::env::var("CASESTACK_HIGH_CONTRAST").is_ok() {
            return Self::high_contrast();
        }
        Self::dark()
    }

    /// Create a dark theme (default).
    pub fn dark() -> Self {
        let base = BaseColors {
            fg: DARK_FG,
            bg: DARK_BG,
            highlight: DARK_HIGHLIGHT,
            muted: DARK_MUTED,
        };
        let ftui_theme = ThemeBuilder::new()
            .background(ftui::Color::rgb(DARK_BG.r, DARK_BG.g, DARK_BG.b))
            .text(ftui::Color::rgb(DARK_FG.r, DARK_FG.g, DARK_FG.b))
            .error(ftui::Color::rgb(DARK_ERROR.r, DARK_ERROR.g, DARK_ERROR.b))
            .warning(ftui::Color::rgb(
                DARK_WARNING.r,
                DARK_WARNING.g,
                DARK_WARNING.b,
            ))
            .success(ftui::Color::rgb(
                DARK_SUCCESS.r,
                DARK_SUCCESS.g,
                DARK_SUCCESS.b,
            ))
            .primary(ftui::Color::rgb(
                DARK_HIGHLIGHT.r,
                DARK_HIGHLIGHT.g,
                DARK_HIGHLIGHT.b,
            ))
            .text_muted(ftui::Color::rgb(DARK_MUTED.r, DARK_MUTED.g, DARK_MUTED.b))
            .border(ftui::Color::rgb(
                DARK_BORDER.r,
                DARK_BORDER.g,
                DARK_BORDER.b,
            ))
            .border_focused(ftui::Color::rgb(
                DARK_HIGHLIGHT.r,
                DARK_HIGHLIGHT.g,
                DARK_HIGHLIGHT.b,
            ))
            .build();

        let stylesheet = build_stylesheet(
            &base,
            DARK_ERROR,
            DARK_WARNING,
            DARK_SUCCESS,
        );

        Self {
            mode: ThemeMode::Dark,
            ftui_theme,
            stylesheet,
            base,
        }
    }

    /// Create a light theme.
    pub fn light() -> Self {
        let base = BaseColors {
            fg: LIGHT_FG,
            bg: LIGHT_BG,
            highlight: LIGHT_HIGHLIGHT,
            muted: LIGHT_MUTED,
        };
        let ftui_theme = ThemeBuilder::new()
            .background(ftui::Color::rgb(LIGHT_BG.r, LIGHT_BG.g, LIGHT_BG.b))
            .text(ftui::Color::rgb(LIGHT_FG.r, LIGHT_FG.g, LIGHT_FG.b))
            .error(ftui::Color::rgb(
                LIGHT_ERROR.r,
                LIGHT_ERROR.g,
                LIGHT_ERROR.b,
            ))
            .warning(ftui::Color::rgb(
                LIGHT_WARNING.r,
                LIGHT_WARNING.g,
                LIGHT_WARNING.b,
            ))
            .success(ftui::Color::rgb(
                LIGHT_SUCCESS.r,
                LIGHT_SUCCESS.g,
                LIGHT_SUCCESS.b,
            ))
            .primary(ftui::Color::rgb(
                LIGHT_HIGHLIGHT.r,
                LIGHT_HIGHLIGHT.g,
                LIGHT_HIGHLIGHT.b,
            ))
            .text_muted(ftui::Color::rgb(
                LIGHT_MUTED.r,
                LIGHT_MUTED.g,
                LIGHT_MUTED.b,
            ))
            .border(ftui::Color::rgb(
                LIGHT_BORDER.r,
                LIGHT_BORDER.g,
                LIGHT_BORDER.b,
            ))
            .border_focused(ftui::Color::rgb(
                LIGHT_HIGHLIGHT.r,
                LIGHT_HIGHLIGHT.g,
                LIGHT_HIGHLIGHT.b,
            ))
            .build();

        let stylesheet = build_stylesheet(
            &base,
            LIGHT_ERROR,
            LIGHT_WARNING,
            LIGHT_SUCCESS,
        );

        Self {
            mode: ThemeMode::Light,
            ftui_theme,
            stylesheet,
            base,
        }
    }

    /// Create a high contrast theme (WCAG AAA: 7:1 minimum ratio).
    pub fn high_contrast() -> Self {
        let base = BaseColors {
            fg: HC_FG,
            bg: HC_BG,
            highlight: HC_HIGHLIGHT,
            muted: HC_MUTED,
        };
        let ftui_theme = ThemeBuilder::new()
            .background(ftui::Color::rgb(HC_BG.r, HC_BG.g, HC_BG.b))
            .text(ftui::Color::rgb(HC_FG.r, HC_FG.g, HC_FG.b))
            .error(ftui::Color::rgb(HC_ERROR.r, HC_ERROR.g, HC_ERROR.b))
            .warning(ftui::Color::rgb(HC_WARNING.r, HC_WARNING.g, HC_WARNING.b))
            .success(ftui::Color::rgb(HC_SUCCESS.r, HC_SUCCESS.g, HC_SUCCESS.b))
            .primary(ftui::Color::rgb(
                HC_HIGHLIGHT.r,
                HC_HIGHLIGHT.g,
                HC_HIGHLIGHT.b,
            ))
            .text_muted(ftui::Color::rgb(HC_MUTED.r, HC_MUTED.g, HC_MUTED.b))
            .border(ftui::Color::rgb(HC_BORDER.r, HC_BORDER.g, HC_BORDER.b))
            .border_focused(ftui::Color::rgb(
                HC_HIGHLIGHT.r,
                HC_HIGHLIGHT.g,
                HC_HIGHLIGHT.b,
            ))
            .build();

        let stylesheet = build_stylesheet(&base, HC_ERROR, HC_WARNING, HC_SUCCESS);

        Self {
            mode: ThemeMode::HighContrast,
            ftui_theme,
            stylesheet,
            base,
        }
    }

    /// Create a no-color theme for terminals without color support.
    /// Respects the `NO_COLOR` environment variable (<https://no-color.org/>).
    pub fn no_color() -> Self {
        let base = BaseColors {
            fg: FtuiRgb::new(255, 255, 255),
            bg: FtuiRgb::new(0, 0, 0),
            highlight: FtuiRgb::new(255, 255, 255),
            muted: FtuiRgb::new(255, 255, 255),
        };

        Self {
            mode: ThemeMode::NoColor,
            ftui_theme: ThemeBuilder::new().build(),
            stylesheet: build_no_color_stylesheet(),
            base,
        }
    }

    /// Access the underlying ftui theme.
    pub fn ftui_theme(&self) -> &FtuiTheme {
        &self.ftui_theme
    }

    /// Access the stylesheet with named style classes.
    pub fn stylesheet(&self) -> &StyleSheet {
        &self.stylesheet
    }

    /// Get an ftui style by class name from the stylesheet.
    pub fn class(&self, name: &str) -> FtuiStyle {
        self.stylesheet.get_or_default(name)
    }

    /// Get the current color profile based on terminal capabilities.
    pub fn color_profile() -> ColorProfile {
        ColorProfile::detect()
    }

    /// Foreground style for the bar segment of one series.
    ///
    /// Uses the shared chart palette in NoColor mode too; ftui drops the
    /// color there, leaving plain cells.
    pub fn series_style(&self, index: usize, highlighted: bool) -> FtuiStyle {
        if self.mode == ThemeMode::NoColor {
            return if highlighted {
                FtuiStyle::new().bold().reverse()
            } else {
                FtuiStyle::new()
            };
        }

        let color = series_color(index);
        let style = FtuiStyle::new().fg(PackedRgba::rgb(color.r, color.g, color.b));
        if highlighted {
            style.bold().reverse()
        } else {
            style
        }
    }

    // --- WCAG validation ---

    /// Validate that base text colors meet WCAG AA (4.5:1 ratio) against
    /// the theme's background color.
    pub fn validate_wcag_aa(&self) -> Vec<String> {
        let mut failures = Vec::new();
        let bg = self.base.bg;

        for (name, fg) in [
            ("text", self.base.fg),
            ("highlight", self.base.highlight),
            ("muted", self.base.muted),
        ] {
            if !meets_wcag_aa(fg, bg) {
                let ratio = contrast_ratio(fg, bg);
                failures.push(format!(
                    "{name} ({fg:?}) on bg ({bg:?}) fails WCAG AA: {ratio:.2}:1 < 4.5:1"
                ));
            }
        }

        failures
    }

    /// Validate that base text colors meet WCAG AAA (7:1 ratio) against
    /// the theme's background color.
    pub fn validate_wcag_aaa(&self) -> Vec<String> {
        let mut failures = Vec::new();
        let bg = self.base.bg;

        for (name, fg) in [
            ("text", self.base.fg),
            ("highlight", self.base.highlight),
            ("muted", self.base.muted),
        ] {
            if !meets_wcag_aaa(fg, bg) {
                let ratio = contrast_ratio(fg, bg);
                failures.push(format!(
                    "{name} ({fg:?}) on bg ({bg:?}) fails WCAG AAA: {ratio:.2}:1 < 7.0:1"
                ));
            }
        }

        failures
    }
}

/// Build the standard stylesheet for a colored theme.
fn build_stylesheet(
    base: &BaseColors,
    error: FtuiRgb,
    warning: FtuiRgb,
    success: FtuiRgb,
) -> StyleSheet {
    let sheet = StyleSheet::new();

    sheet.define(
        "chart.title",
        FtuiStyle::new()
            .fg(PackedRgba::rgb(base.fg.r, base.fg.g, base.fg.b))
            .bold(),
    );
    sheet.define(
        "chart.axis",
        FtuiStyle::new().fg(PackedRgba::rgb(base.muted.r, base.muted.g, base.muted.b)),
    );

    sheet.define(
        "legend.label",
        FtuiStyle::new().fg(PackedRgba::rgb(base.fg.r, base.fg.g, base.fg.b)),
    );
    sheet.define(
        "legend.selected",
        FtuiStyle::new()
            .fg(PackedRgba::rgb(
                base.highlight.r,
                base.highlight.g,
                base.highlight.b,
            ))
            .bold(),
    );

    sheet.define(
        "status.normal",
        FtuiStyle::new().fg(PackedRgba::rgb(base.muted.r, base.muted.g, base.muted.b)),
    );
    sheet.define(
        "status.error",
        FtuiStyle::new()
            .fg(PackedRgba::rgb(error.r, error.g, error.b))
            .bold(),
    );
    sheet.define(
        "status.warning",
        FtuiStyle::new().fg(PackedRgba::rgb(warning.r, warning.g, warning.b)),
    );
    sheet.define(
        "status.success",
        FtuiStyle::new().fg(PackedRgba::rgb(success.r, success.g, success.b)),
    );

    sheet.define("border.normal", FtuiStyle::new());
    sheet.define(
        "border.focused",
        FtuiStyle::new()
            .fg(PackedRgba::rgb(
                base.highlight.r,
                base.highlight.g,
                base.highlight.b,
            ))
            .bold(),
    );

    sheet
}

/// Build a stylesheet for NO_COLOR mode using only text attributes.
fn build_no_color_stylesheet() -> StyleSheet {
    let sheet = StyleSheet::new();

    sheet.define("chart.title", FtuiStyle::new().bold());
    sheet.define("chart.axis", FtuiStyle::new());

    sheet.define("legend.label", FtuiStyle::new());
    sheet.define("legend.selected", FtuiStyle::new().bold().reverse());

    sheet.define("status.normal", FtuiStyle::new());
    sheet.define("status.error", FtuiStyle::new().bold().underline());
    sheet.define("status.warning", FtuiStyle::new().bold());
    sheet.define("status.success", FtuiStyle::new());

    sheet.define("border.normal", FtuiStyle::new());
    sheet.define("border.focused", FtuiStyle::new().bold());

    sheet
}
