//! Status bar widget.
//!
//! Bottom-of-screen status bar showing the current view, the highlighted
//! series, a mode indicator, and context-sensitive key hints.

use ftui::widgets::Widget as FtuiWidget;

use crate::tui::theme::Theme;

/// Display mode for the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusMode {
    /// Normal browsing.
    #[default]
    Browsing,
    /// Help overlay visible.
    Help,
}

impl StatusMode {
    /// Display label for the mode.
    pub fn label(self) -> &'static str {
        match self {
            StatusMode::Browsing => "Browse",
            StatusMode::Help => "Help",
        }
    }

    /// Context-sensitive key hints for this mode.
    pub fn hints(self) -> &'static [(&'static str, &'static str)] {
        match self {
            StatusMode::Browsing => &[
                ("\u{2190}\u{2192}", "series"),
                ("Enter", "drill"),
                ("r", "reset"),
                ("?", "help"),
                ("q", "quit"),
            ],
            StatusMode::Help => &[("?", "close"), ("Esc", "close")],
        }
    }
}

/// Status bar widget for the bottom of the TUI.
#[derive(Debug)]
pub struct StatusBar<'a> {
    /// Theme for styling.
    theme: Option<&'a Theme>,
    /// Current mode.
    mode: StatusMode,
    /// Label of the view being shown.
    view: Option<&'a str>,
    /// Label of the highlighted series.
    highlighted: Option<&'a str>,
    /// Custom status message (overrides auto-generated content).
    message: Option<&'a str>,
}

impl<'a> Default for StatusBar<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar.
    pub fn new() -> Self {
        Self {
            theme: None,
            mode: StatusMode::Browsing,
            view: None,
            highlighted: None,
            message: None,
        }
    }

    /// Set the theme.
    pub fn theme(mut self, theme: &'a Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Set the current mode.
    pub fn mode(mut self, mode: StatusMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the view label.
    pub fn view(mut self, view: &'a str) -> Self {
        self.view = Some(view);
        self
    }

    /// Set the highlighted series label.
    pub fn highlighted(mut self, label: &'a str) -> Self {
        self.highlighted = Some(label);
        self
    }

    /// Set a custom status message (overrides auto-generated content).
    pub fn message(mut self, message: &'a str) -> Self {
        self.message = Some(message);
        self
    }

    /// Build the left-side status text.
    pub fn build_left_text(&self) -> String {
        if let Some(msg) = self.message {
            return msg.to_string();
        }

        let mut parts = Vec::new();
        if let Some(view) = self.view {
            parts.push(view.to_string());
        }
        if let Some(label) = self.highlighted {
            parts.push(format!("\u{25a0} {}", label));
        }

        if parts.is_empty() {
            "Ready".to_string()
        } else {
            parts.join(" \u{2502} ")
        }
    }

    /// Build the mode indicator text.
    pub fn build_mode_text(&self) -> String {
        format!("[{}]", self.mode.label())
    }

    /// Build the hints text.
    pub fn build_hints_text(&self) -> String {
        self.mode
            .hints()
            .iter()
            .map(|(key, action)| format!("{}: {}", key, action))
            .collect::<Vec<_>>()
            .join("  ")
    }

    /// Render using an ftui Paragraph.
    pub fn render_ftui(&self, area: ftui::layout::Rect, frame: &mut ftui::render::frame::Frame) {
        let style = self
            .theme
            .map(|t| t.class("status.normal"))
            .unwrap_or_default();

        let text = if let Some(msg) = self.message {
            format!("{} | Press ? for help", msg)
        } else {
            format!(
                "{} \u{2502} {} \u{2502} {}",
                self.build_left_text(),
                self.build_mode_text(),
                self.build_hints_text()
            )
        };

        let paragraph = ftui::widgets::paragraph::Paragraph::new(text).style(style);
        FtuiWidget::render(&paragraph, area, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_bar() {
        let bar = StatusBar::new();
        assert_eq!(bar.mode, StatusMode::Browsing);
        assert!(bar.view.is_none());
        assert!(bar.message.is_none());
    }

    #[test]
    fn test_build_left_ready_when_empty() {
        assert_eq!(StatusBar::new().build_left_text(), "Ready");
    }

    #[test]
    fn test_build_left_with_view_and_series() {
        let bar = StatusBar::new()
            .view("Operation types by age bin")
            .highlighted("Biliary");
        let text = bar.build_left_text();
        assert!(text.contains("Operation types by age bin"));
        assert!(text.contains("Biliary"));
    }

    #[test]
    fn test_build_left_custom_message_wins() {
        let bar = StatusBar::new().view("Overview").message("Reset to overview");
        assert_eq!(bar.build_left_text(), "Reset to overview");
    }

    #[test]
    fn test_build_mode_text() {
        assert_eq!(
            StatusBar::new().mode(StatusMode::Browsing).build_mode_text(),
            "[Browse]"
        );
        assert_eq!(
            StatusBar::new().mode(StatusMode::Help).build_mode_text(),
            "[Help]"
        );
    }

    #[test]
    fn test_browsing_hints() {
        let hints = StatusBar::new().build_hints_text();
        assert!(hints.contains("Enter: drill"));
        assert!(hints.contains("r: reset"));
        assert!(hints.contains("q: quit"));
    }
}
