//! Legend panel widget.
//!
//! Lists every series in the current layout with its palette swatch.
//! The entry under the series cursor is highlighted so the user can see
//! which series Enter will drill into.

use cs_stack::SeriesKey;
use ftui::text::{Line as FtuiLine, Span as FtuiSpan, Text as FtuiText};
use ftui::widgets::block::Block as FtuiBlock;
use ftui::widgets::paragraph::Paragraph as FtuiParagraph;
use ftui::widgets::Widget as FtuiWidget;

use crate::tui::theme::Theme;

/// Legend panel widget.
#[derive(Debug)]
pub struct LegendPanel<'a> {
    /// Theme for styling.
    theme: Option<&'a Theme>,
    /// Highlighted series index.
    cursor: Option<usize>,
}

impl<'a> Default for LegendPanel<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> LegendPanel<'a> {
    /// Create a new legend panel.
    pub fn new() -> Self {
        Self {
            theme: None,
            cursor: None,
        }
    }

    /// Set the theme.
    pub fn theme(mut self, theme: &'a Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Set the highlighted series index.
    pub fn cursor(mut self, cursor: Option<usize>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Build one line per series: swatch, then label.
    pub fn build_lines(&self, series: &[SeriesKey]) -> Vec<FtuiLine> {
        if series.is_empty() {
            return vec![FtuiLine::raw("(no series)")];
        }

        series
            .iter()
            .enumerate()
            .map(|(i, key)| {
                let selected = self.cursor == Some(i);
                let swatch_style = self
                    .theme
                    .map(|t| t.series_style(i, false))
                    .unwrap_or_default();
                let label_class = if selected {
                    "legend.selected"
                } else {
                    "legend.label"
                };
                let label_style = self
                    .theme
                    .map(|t| t.class(label_class))
                    .unwrap_or_default();
                let marker = if selected { "\u{25b8} " } else { "  " };

                FtuiLine::from_spans([
                    FtuiSpan::styled(marker.to_string(), label_style),
                    FtuiSpan::styled("\u{25a0} ", swatch_style),
                    FtuiSpan::styled(key.label().to_string(), label_style),
                ])
            })
            .collect()
    }

    /// Render the legend into the given area.
    pub fn render_ftui(
        &self,
        area: ftui::layout::Rect,
        frame: &mut ftui::render::frame::Frame,
        series: &[SeriesKey],
    ) {
        let border_style = self
            .theme
            .map(|t| t.class("border.normal"))
            .unwrap_or_default();
        let block = FtuiBlock::bordered()
            .title(" Legend ")
            .border_style(border_style);

        let text: FtuiText = self.build_lines(series).into_iter().collect();
        let paragraph = FtuiParagraph::new(text).block(block);
        FtuiWidget::render(&paragraph, area, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_to_string(lines: &[FtuiLine]) -> Vec<String> {
        lines
            .iter()
            .map(|l| {
                l.spans()
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .collect()
    }

    fn series() -> Vec<SeriesKey> {
        vec![
            SeriesKey::Key("Biliary".to_string()),
            SeriesKey::Key("Vascular".to_string()),
            SeriesKey::Missing,
        ]
    }

    #[test]
    fn one_line_per_series() {
        let lines = LegendPanel::new().build_lines(&series());
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn missing_series_shows_none_label() {
        let rendered = lines_to_string(&LegendPanel::new().build_lines(&series()));
        assert!(rendered[2].contains("(none)"));
    }

    #[test]
    fn cursor_entry_is_marked() {
        let rendered =
            lines_to_string(&LegendPanel::new().cursor(Some(1)).build_lines(&series()));
        assert!(rendered[1].starts_with('\u{25b8}'));
        assert!(!rendered[0].starts_with('\u{25b8}'));
    }

    #[test]
    fn empty_series_renders_placeholder() {
        let rendered = lines_to_string(&LegendPanel::new().build_lines(&[]));
        assert_eq!(rendered, ["(no series)"]);
    }
}
