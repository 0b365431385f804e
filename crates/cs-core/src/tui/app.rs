//! Application model for the explorer TUI.
//!
//! Implements ftui's Elm-style `Model`: every state change flows through
//! [`Msg`] and an explicit `match` in `update`. The model owns an
//! [`ExplorerSession`] and a series cursor that plays the role of hover:
//! moving the cursor highlights one series in the chart and legend, and
//! Enter drills into it.

use ftui::layout::Rect;
use ftui::runtime::Subscription;
use ftui::{
    Cell as FtuiCell, Cmd as FtuiCmd, Frame as FtuiFrame, KeyCode as FtuiKeyCode,
    KeyEvent as FtuiKeyEvent, KeyEventKind as FtuiKeyEventKind, Model as FtuiModel, Program,
    ProgramConfig,
};

use crate::session::{ExplorerSession, ViewState};
use crate::tui::events::KeyBindings;
use crate::tui::layout::{Breakpoint, LayoutState, ResponsiveLayout};
use crate::tui::msg::Msg;
use crate::tui::theme::{Theme, ThemeMode};
use crate::tui::widgets::{ChartView, HelpOverlay, LegendPanel, StatusBar, StatusMode};
use crate::tui::{TuiError, TuiResult};

/// Top-level UI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Normal chart browsing.
    #[default]
    Browsing,
    /// Help overlay visible.
    Help,
    /// Shutting down.
    Quitting,
}

/// Explorer TUI application model.
#[derive(Debug)]
pub struct App {
    /// Drill-down session holding records and the current layout.
    session: ExplorerSession,
    /// Current UI state.
    pub state: AppState,
    /// Active theme.
    pub theme: Theme,
    /// Key bindings.
    key_bindings: KeyBindings,
    /// Highlighted series index (hover analog). `None` means nothing
    /// highlighted.
    cursor: Option<usize>,
    /// Terminal size and breakpoint tracking.
    layout_state: LayoutState,
    /// Transient status message.
    pub status_message: Option<String>,
}

impl App {
    /// Create an app over a loaded session.
    pub fn new(session: ExplorerSession) -> Self {
        Self {
            session,
            state: AppState::Browsing,
            theme: Theme::from_env(),
            key_bindings: KeyBindings::default(),
            cursor: None,
            layout_state: LayoutState::new(80, 24),
            status_message: None,
        }
    }

    /// Replace the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn session(&self) -> &ExplorerSession {
        &self.session
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn should_quit(&self) -> bool {
        self.state == AppState::Quitting
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.layout_state.breakpoint()
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    fn series_len(&self) -> usize {
        self.session.layout().series.len()
    }

    fn cursor_next(&mut self) {
        let len = self.series_len();
        if len == 0 {
            return;
        }
        self.cursor = Some(match self.cursor {
            None => 0,
            Some(i) => (i + 1).min(len - 1),
        });
    }

    fn cursor_prev(&mut self) {
        if self.series_len() == 0 {
            return;
        }
        self.cursor = self.cursor.map(|i| i.saturating_sub(1)).or(Some(0));
    }

    fn drill_down(&mut self) {
        if !matches!(self.session.view(), ViewState::Overview) {
            self.set_status("Already in a detail view (r resets)");
            return;
        }
        let Some(key) = self
            .cursor
            .and_then(|i| self.session.layout().series.get(i).cloned())
        else {
            self.set_status("Highlight an operation type first (\u{2190}/\u{2192})");
            return;
        };

        tracing::info!(target: "tui.user_input", optype = %key, "drill-down requested");
        self.session.drill_down(key);
        self.cursor = None;
        self.set_status(self.session.title());
    }

    fn reset_view(&mut self) {
        if matches!(self.session.view(), ViewState::Overview) {
            return;
        }
        tracing::info!(target: "tui.user_input", action = "reset", "reset to overview");
        self.session.reset();
        self.cursor = None;
        self.set_status("Reset to overview");
    }

    fn handle_msg(&mut self, msg: Msg) -> FtuiCmd<Msg> {
        match msg {
            Msg::KeyPressed(key) => self.handle_key_event(key),
            Msg::Resized { width, height } => {
                self.layout_state.update(width, height);
                FtuiCmd::none()
            }
            Msg::Tick | Msg::Noop => FtuiCmd::none(),
            Msg::FocusChanged(_) => FtuiCmd::none(),

            Msg::SeriesNext => {
                self.cursor_next();
                FtuiCmd::none()
            }
            Msg::SeriesPrev => {
                self.cursor_prev();
                FtuiCmd::none()
            }
            Msg::SeriesHome => {
                if self.series_len() > 0 {
                    self.cursor = Some(0);
                }
                FtuiCmd::none()
            }
            Msg::SeriesEnd => {
                let len = self.series_len();
                if len > 0 {
                    self.cursor = Some(len - 1);
                }
                FtuiCmd::none()
            }

            Msg::DrillDown => {
                self.drill_down();
                FtuiCmd::none()
            }
            Msg::ResetView => {
                self.reset_view();
                FtuiCmd::none()
            }
            Msg::ToggleHelp => {
                self.state = if self.state == AppState::Help {
                    AppState::Browsing
                } else {
                    AppState::Help
                };
                FtuiCmd::none()
            }

            Msg::SwitchTheme(name) => {
                self.theme = match name.to_lowercase().as_str() {
                    "light" => Theme::light(),
                    "high_contrast" | "high-contrast" | "hc" => Theme::high_contrast(),
                    "no_color" | "no-color" => Theme::no_color(),
                    _ => Theme::dark(),
                };
                FtuiCmd::none()
            }

            Msg::Quit => {
                self.state = AppState::Quitting;
                FtuiCmd::quit()
            }
        }
    }

    fn handle_key_event(&mut self, key: FtuiKeyEvent) -> FtuiCmd<Msg> {
        if !matches!(key.kind, FtuiKeyEventKind::Press | FtuiKeyEventKind::Repeat) {
            return FtuiCmd::none();
        }

        tracing::debug!(
            target: "tui.user_input",
            key_code = ?key.code,
            modifiers = ?key.modifiers,
            app_state = ?self.state,
            "key event received"
        );

        match self.state {
            AppState::Browsing => self.handle_browsing_key(key),
            AppState::Help => self.handle_help_key(key),
            AppState::Quitting => FtuiCmd::quit(),
        }
    }

    fn handle_browsing_key(&mut self, key: FtuiKeyEvent) -> FtuiCmd<Msg> {
        if self.key_bindings.is_quit(&key) {
            self.state = AppState::Quitting;
            return FtuiCmd::quit();
        }
        if self.key_bindings.is_cancel(&key) {
            // Esc backs out of a detail view; from the overview it quits.
            if matches!(self.session.view(), ViewState::Detail { .. }) {
                return FtuiCmd::msg(Msg::ResetView);
            }
            self.state = AppState::Quitting;
            return FtuiCmd::quit();
        }
        if self.key_bindings.is_help(&key) {
            self.state = AppState::Help;
            return FtuiCmd::none();
        }
        if self.key_bindings.is_next(&key) {
            return FtuiCmd::msg(Msg::SeriesNext);
        }
        if self.key_bindings.is_prev(&key) {
            return FtuiCmd::msg(Msg::SeriesPrev);
        }
        if self.key_bindings.is_confirm(&key) {
            return FtuiCmd::msg(Msg::DrillDown);
        }
        if self.key_bindings.is_reset(&key) {
            return FtuiCmd::msg(Msg::ResetView);
        }
        if self.key_bindings.is_theme(&key) {
            let next = match self.theme.mode {
                ThemeMode::Dark => "light",
                ThemeMode::Light => "high_contrast",
                ThemeMode::HighContrast => "no_color",
                ThemeMode::NoColor => "dark",
            };
            return self.handle_msg(Msg::SwitchTheme(next.to_string()));
        }

        match key.code {
            FtuiKeyCode::Home => FtuiCmd::msg(Msg::SeriesHome),
            FtuiKeyCode::End => FtuiCmd::msg(Msg::SeriesEnd),
            _ => FtuiCmd::none(),
        }
    }

    fn handle_help_key(&mut self, key: FtuiKeyEvent) -> FtuiCmd<Msg> {
        if matches!(
            key.code,
            FtuiKeyCode::Escape | FtuiKeyCode::Char('q') | FtuiKeyCode::Char('?')
        ) {
            self.state = AppState::Browsing;
        }
        FtuiCmd::none()
    }
}

impl FtuiModel for App {
    type Message = Msg;

    fn init(&mut self) -> FtuiCmd<Self::Message> {
        tracing::info!(
            target: "tui.startup",
            records = self.session.records().len(),
            theme = ?self.theme.mode,
            "explorer model initialized"
        );
        FtuiCmd::none()
    }

    fn update(&mut self, msg: Self::Message) -> FtuiCmd<Self::Message> {
        self.handle_msg(msg)
    }

    fn view(&self, frame: &mut FtuiFrame) {
        let full_area = Rect::new(0, 0, frame.width(), frame.height());
        let layout = ResponsiveLayout::new(full_area);

        // Degrade gracefully for tiny terminals
        if layout.is_too_small() {
            draw_text(frame, 0, 0, "Terminal too small (min 40x10)");
            return;
        }

        let areas = layout.explorer_areas();

        let title = ftui::widgets::paragraph::Paragraph::new(self.session.title())
            .style(self.theme.class("chart.title"));
        ftui::widgets::Widget::render(&title, areas.title, frame);

        ChartView::new()
            .theme(&self.theme)
            .cursor(self.cursor)
            .render_ftui(areas.chart, frame, self.session.layout());

        if let Some(legend_area) = areas.legend {
            LegendPanel::new()
                .theme(&self.theme)
                .cursor(self.cursor)
                .render_ftui(legend_area, frame, &self.session.layout().series);
        }

        let status_mode = match self.state {
            AppState::Browsing | AppState::Quitting => StatusMode::Browsing,
            AppState::Help => StatusMode::Help,
        };
        let view_title = self.session.title();
        let highlighted = self
            .cursor
            .and_then(|i| self.session.layout().series.get(i))
            .map(|s| s.label().to_string());
        let mut status_bar = StatusBar::new()
            .theme(&self.theme)
            .mode(status_mode)
            .view(&view_title);
        if let Some(ref label) = highlighted {
            status_bar = status_bar.highlighted(label);
        }
        if let Some(ref msg) = self.status_message {
            status_bar = status_bar.message(msg);
        }
        status_bar.render_ftui(areas.status, frame);

        // Help overlay on top of everything
        if self.state == AppState::Help {
            HelpOverlay::new()
                .theme(&self.theme)
                .breakpoint(layout.breakpoint())
                .render_ftui(full_area, frame);
        }
    }

    fn subscriptions(&self) -> Vec<Box<dyn Subscription<Self::Message>>> {
        // Static dataset, nothing to poll.
        Vec::new()
    }
}

fn draw_text(frame: &mut FtuiFrame, x: u16, y: u16, text: &str) {
    if y >= frame.height() || x >= frame.width() {
        return;
    }

    let mut col = x;
    let max_col = frame.width();
    for ch in text.chars() {
        if col >= max_col {
            break;
        }
        frame.buffer.set(col, y, FtuiCell::from_char(ch));
        col = col.saturating_add(1);
    }
}

/// Run the TUI using the ftui runtime.
///
/// Delegates terminal setup, event polling, and teardown entirely to
/// ftui's `Program` runtime.
pub fn run_tui(app: App) -> TuiResult<()> {
    let mut program = Program::with_config(app, ProgramConfig::default())
        .map_err(|e| TuiError::TerminalInit(e.to_string()))?;
    program
        .run()
        .map_err(|e| TuiError::Runtime(e.to_string()))
}
