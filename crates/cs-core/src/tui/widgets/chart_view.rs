//! Stacked bar chart widget.
//!
//! Renders a [`StackLayout`] as horizontal stacked bars, one row per
//! group, using the shared chart palette. Segment boundaries are placed
//! by rounding the cumulative value so each row is gap-free and the
//! rounding error never exceeds one cell.

use cs_stack::{StackLayout, ValueMode};
use ftui::text::{Line as FtuiLine, Span as FtuiSpan, Text as FtuiText};
use ftui::widgets::paragraph::Paragraph as FtuiParagraph;
use ftui::widgets::Widget as FtuiWidget;

use crate::tui::theme::Theme;

/// Widest label column the chart reserves for group labels.
const MAX_LABEL_COL: usize = 14;

/// Stacked bar chart widget.
#[derive(Debug)]
pub struct ChartView<'a> {
    /// Theme for styling.
    theme: Option<&'a Theme>,
    /// Highlighted series index (hover analog).
    cursor: Option<usize>,
}

impl<'a> Default for ChartView<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ChartView<'a> {
    /// Create a new chart view.
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

    /// Width of the group label column for a layout.
    fn label_col(layout: &StackLayout) -> usize {
        layout
            .groups
            .iter()
            .map(|g| g.key.label().chars().count())
            .max()
            .unwrap_or(0)
            .clamp(4, MAX_LABEL_COL)
            + 1
    }

    /// Build one styled line per group, plus an axis line at the bottom.
    pub fn build_lines(&self, layout: &StackLayout, width: u16) -> Vec<FtuiLine> {
        if layout.is_empty() {
            return vec![FtuiLine::raw("no records to display")];
        }

        let label_col = Self::label_col(layout);
        let bar_width = (width as usize).saturating_sub(label_col).max(1);
        let axis_max = layout.axis_max();

        let mut lines = Vec::with_capacity(layout.groups.len() + 1);
        for group in &layout.groups {
            let mut spans = Vec::with_capacity(group.segments.len() + 1);
            let label = format!("{:<width$}", group.key.label(), width = label_col);
            let label_style = self
                .theme
                .map(|t| t.class("chart.axis"))
                .unwrap_or_default();
            spans.push(FtuiSpan::styled(label, label_style));

            for (i, segment) in group.segments.iter().enumerate() {
                let start = boundary(segment.start, axis_max, bar_width);
                let end = boundary(segment.end, axis_max, bar_width);
                if end <= start {
                    continue;
                }
                let highlighted = self.cursor == Some(i);
                let style = self
                    .theme
                    .map(|t| t.series_style(i, highlighted))
                    .unwrap_or_default();
                spans.push(FtuiSpan::styled("\u{2588}".repeat(end - start), style));
            }

            lines.push(FtuiLine::from_spans(spans));
        }

        lines.push(self.axis_line(layout, label_col, bar_width));
        lines
    }

    /// Bottom axis line: origin and maximum markers.
    fn axis_line(&self, layout: &StackLayout, label_col: usize, bar_width: usize) -> FtuiLine {
        let max_label = match layout.mode {
            ValueMode::Fraction => "100%".to_string(),
            ValueMode::Count => format!("{}", layout.axis_max() as usize),
        };
        let pad = bar_width.saturating_sub(1 + max_label.chars().count());
        let text = format!(
            "{:label$}0{:pad$}{max_label}",
            "",
            "",
            label = label_col,
            pad = pad,
        );
        let style = self
            .theme
            .map(|t| t.class("chart.axis"))
            .unwrap_or_default();
        FtuiLine::from_spans([FtuiSpan::styled(text, style)])
    }

    /// Render the chart into the given area.
    pub fn render_ftui(
        &self,
        area: ftui::layout::Rect,
        frame: &mut ftui::render::frame::Frame,
        layout: &StackLayout,
    ) {
        let text: FtuiText = self.build_lines(layout, area.width).into_iter().collect();
        let paragraph = FtuiParagraph::new(text);
        FtuiWidget::render(&paragraph, area, frame);
    }
}

/// Cell position of a cumulative value on a bar of `bar_width` cells.
fn boundary(value: f64, axis_max: f64, bar_width: usize) -> usize {
    if axis_max <= 0.0 {
        return 0;
    }
    let pos = (value / axis_max * bar_width as f64).round() as usize;
    pos.min(bar_width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_stack::compute_stack;

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

    fn sample_layout() -> StackLayout {
        let records = [
            ("20-29", Some("Biliary")),
            ("20-29", Some("Vascular")),
            ("30-39", Some("Biliary")),
        ];
        compute_stack(
            &records,
            |r| r.0.to_string(),
            |r| r.1.map(str::to_string),
            ValueMode::Fraction,
        )
    }

    #[test]
    fn empty_layout_renders_placeholder() {
        let layout = StackLayout::empty(ValueMode::Fraction);
        let lines = ChartView::new().build_lines(&layout, 80);
        assert_eq!(lines_to_string(&lines), ["no records to display"]);
    }

    #[test]
    fn one_line_per_group_plus_axis() {
        let layout = sample_layout();
        let lines = ChartView::new().build_lines(&layout, 80);
        assert_eq!(lines.len(), layout.groups.len() + 1);
    }

    #[test]
    fn group_labels_lead_each_row() {
        let layout = sample_layout();
        let rendered = lines_to_string(&ChartView::new().build_lines(&layout, 80));
        // Axis is descending, so the older bin comes first.
        assert!(rendered[0].starts_with("30-39"));
        assert!(rendered[1].starts_with("20-29"));
    }

    #[test]
    fn fraction_bars_fill_the_row() {
        let layout = sample_layout();
        let width = 80u16;
        let label_col = ChartView::label_col(&layout);
        let rendered = lines_to_string(&ChartView::new().build_lines(&layout, width));

        for row in &rendered[..layout.groups.len()] {
            let bar_cells = row.chars().filter(|c| *c == '\u{2588}').count();
            assert_eq!(
                bar_cells,
                width as usize - label_col,
                "fraction bars should span the full bar width"
            );
        }
    }

    #[test]
    fn axis_line_shows_origin_and_max() {
        let layout = sample_layout();
        let rendered = lines_to_string(&ChartView::new().build_lines(&layout, 80));
        let axis = rendered.last().unwrap();
        assert!(axis.contains('0'));
        assert!(axis.ends_with("100%"));
    }

    #[test]
    fn count_axis_uses_integers() {
        let records = [("20-29", Some("A")), ("20-29", Some("A"))];
        let layout = compute_stack(
            &records,
            |r| r.0.to_string(),
            |r| r.1.map(str::to_string),
            ValueMode::Count,
        );
        let rendered = lines_to_string(&ChartView::new().build_lines(&layout, 40));
        assert!(rendered.last().unwrap().ends_with('2'));
    }

    #[test]
    fn boundary_is_monotone_and_bounded() {
        assert_eq!(boundary(0.0, 1.0, 50), 0);
        assert_eq!(boundary(1.0, 1.0, 50), 50);
        assert_eq!(boundary(0.5, 1.0, 50), 25);
        assert_eq!(boundary(2.0, 0.0, 50), 0);
    }
}
