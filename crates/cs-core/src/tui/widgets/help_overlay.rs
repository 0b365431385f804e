//! Help overlay widget.
//!
//! Modal overlay showing keyboard shortcuts. Uses ftui's
//! Modal + Block + Paragraph for rendering.

use ftui::text::{Line as FtuiLine, Span as FtuiSpan, Text as FtuiText};
use ftui::widgets::block::Block as FtuiBlock;
use ftui::widgets::modal::{Modal, ModalPosition, ModalSizeConstraints};
use ftui::widgets::paragraph::Paragraph as FtuiParagraph;
use ftui::widgets::Widget as FtuiWidget;
use ftui::PackedRgba;
use ftui::Style as FtuiStyle;

use crate::tui::layout::Breakpoint;
use crate::tui::theme::Theme;

/// A single keybinding entry.
#[derive(Debug, Clone)]
struct Binding {
    key: &'static str,
    desc: &'static str,
}

/// A section of related keybindings.
#[derive(Debug, Clone)]
struct Section {
    title: &'static str,
    bindings: &'static [Binding],
}

const NAVIGATION: &[Binding] = &[
    Binding {
        key: "\u{2192} / l / Tab",
        desc: "Next series",
    },
    Binding {
        key: "\u{2190} / h",
        desc: "Previous series",
    },
    Binding {
        key: "Home",
        desc: "First series",
    },
    Binding {
        key: "End",
        desc: "Last series",
    },
];

const ACTIONS: &[Binding] = &[
    Binding {
        key: "Enter",
        desc: "Drill into highlighted type",
    },
    Binding {
        key: "r",
        desc: "Reset to overview",
    },
    Binding {
        key: "Esc",
        desc: "Back (or quit from overview)",
    },
];

const GENERAL: &[Binding] = &[
    Binding {
        key: "?",
        desc: "Toggle help",
    },
    Binding {
        key: "t",
        desc: "Cycle color theme",
    },
    Binding {
        key: "q",
        desc: "Quit",
    },
];

const SECTIONS: &[Section] = &[
    Section {
        title: "Navigation",
        bindings: NAVIGATION,
    },
    Section {
        title: "Actions",
        bindings: ACTIONS,
    },
    Section {
        title: "General",
        bindings: GENERAL,
    },
];

/// Key column width for full layout.
const KEY_COL_WIDTH: usize = 14;

/// Help overlay widget showing keyboard shortcuts.
#[derive(Debug)]
pub struct HelpOverlay<'a> {
    /// Theme for styling.
    theme: Option<&'a Theme>,
    /// Current breakpoint for adaptive layout.
    breakpoint: Breakpoint,
}

impl<'a> Default for HelpOverlay<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> HelpOverlay<'a> {
    /// Create a new help overlay.
    pub fn new() -> Self {
        Self {
            theme: None,
            breakpoint: Breakpoint::Standard,
        }
    }

    /// Set the theme.
    pub fn theme(mut self, theme: &'a Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Set the breakpoint for adaptive layout.
    pub fn breakpoint(mut self, breakpoint: Breakpoint) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    /// Build compact help text lines for small terminals.
    pub fn build_compact_lines() -> Vec<FtuiLine> {
        vec![
            FtuiLine::raw("Series: \u{2190}/\u{2192} Home/End"),
            FtuiLine::raw("Drill: Enter"),
            FtuiLine::raw("Reset: r/Esc"),
            FtuiLine::raw("Help: ?  Quit: q"),
        ]
    }

    /// Build full help text lines with formatted sections.
    pub fn build_full_lines(theme: Option<&Theme>) -> Vec<FtuiLine> {
        let title_style = theme
            .map(|t| t.class("chart.title"))
            .unwrap_or_else(|| FtuiStyle::new().bold());

        let key_style = theme
            .map(|t| t.class("legend.selected"))
            .unwrap_or_else(|| FtuiStyle::new().fg(PackedRgba::rgb(0, 255, 255)).bold());

        let desc_style = theme
            .map(|t| t.class("legend.label"))
            .unwrap_or_default();

        let mut lines = Vec::new();

        lines.push(FtuiLine::from_spans([FtuiSpan::styled(
            "  Case Explorer Help",
            title_style,
        )]));
        lines.push(FtuiLine::raw(""));

        for section in SECTIONS {
            lines.push(FtuiLine::from_spans([FtuiSpan::styled(
                format!("  {}:", section.title),
                title_style,
            )]));

            for binding in section.bindings {
                let padded_key = format!("    {:width$}", binding.key, width = KEY_COL_WIDTH);
                lines.push(FtuiLine::from_spans([
                    FtuiSpan::styled(padded_key, key_style),
                    FtuiSpan::styled(binding.desc, desc_style),
                ]));
            }

            lines.push(FtuiLine::raw(""));
        }

        lines
    }

    /// Render the help overlay using ftui Modal + Paragraph.
    pub fn render_ftui(&self, area: ftui::layout::Rect, frame: &mut ftui::render::frame::Frame) {
        let lines = match self.breakpoint {
            Breakpoint::Minimal => Self::build_compact_lines(),
            _ => Self::build_full_lines(self.theme),
        };

        let border_style = self
            .theme
            .map(|t| t.class("border.focused"))
            .unwrap_or_else(|| FtuiStyle::new().bold());

        let block = FtuiBlock::bordered()
            .title(" Help ")
            .border_style(border_style);

        let text: FtuiText = lines.into_iter().collect();
        let paragraph = FtuiParagraph::new(text).block(block);

        let size = ModalSizeConstraints::new()
            .min_width(30)
            .max_width((area.width as f32 * 0.5) as u16)
            .min_height(10)
            .max_height((area.height as f32 * 0.6) as u16);

        let modal = Modal::new(paragraph)
            .position(ModalPosition::Center)
            .size(size);

        FtuiWidget::render(&modal, area, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Extract plain text from ftui Lines for test assertions.
    fn lines_to_string(lines: &[FtuiLine]) -> String {
        lines
            .iter()
            .map(|l| {
                l.spans()
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_compact_lines_cover_all_actions() {
        let text = lines_to_string(&HelpOverlay::build_compact_lines());
        assert!(text.contains("Series"));
        assert!(text.contains("Drill"));
        assert!(text.contains("Reset"));
        assert!(text.contains("Quit"));
    }

    #[test]
    fn test_full_lines_has_all_sections() {
        let text = lines_to_string(&HelpOverlay::build_full_lines(None));
        assert!(text.contains("Case Explorer Help"));
        assert!(text.contains("Navigation:"));
        assert!(text.contains("Actions:"));
        assert!(text.contains("General:"));
    }

    #[test]
    fn test_full_lines_has_all_bindings() {
        let text = lines_to_string(&HelpOverlay::build_full_lines(None));
        assert!(text.contains("Next series"));
        assert!(text.contains("Drill into highlighted type"));
        assert!(text.contains("Reset to overview"));
        assert!(text.contains("Toggle help"));
        assert!(text.contains("Cycle color theme"));
    }

    #[test]
    fn test_full_lines_line_count() {
        let lines = HelpOverlay::build_full_lines(None);
        let total_bindings: usize = SECTIONS.iter().map(|s| s.bindings.len()).sum();
        // Lines = title + blank + (section header + bindings + blank) per section
        let expected = 1 + 1 + SECTIONS.len() + total_bindings + SECTIONS.len();
        assert_eq!(lines.len(), expected);
    }
}
