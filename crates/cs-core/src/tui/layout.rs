//! Responsive constraint-based TUI layouts.
//!
//! Layouts adapt to terminal size using ftui's Flex constraint solver,
//! switching between breakpoints based on terminal width.
//!
//! # Breakpoints
//!
//! - **Wide** (>= 200 cols): chart plus wide legend pane
//! - **Standard** (120-199 cols): chart plus legend pane
//! - **Compact** (80-119 cols): chart plus narrow legend pane
//! - **Minimal** (< 80 cols): chart only, legend folded into the status line
//!
//! # Usage
//!
//! ```ignore
//! let layout = ResponsiveLayout::new(frame_area);
//! let areas = layout.explorer_areas();
//! // Use areas.title, areas.chart, areas.legend, areas.status for rendering
//! ```

use ftui::layout::{Constraint, Flex, Rect};
use tracing::{debug, trace};

/// Terminal size breakpoints for responsive layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    /// Minimal terminal (< 80 columns).
    Minimal,
    /// Compact terminal (80-119 columns).
    Compact,
    /// Standard terminal (120-199 columns).
    Standard,
    /// Wide terminal (>= 200 columns).
    Wide,
}

impl Breakpoint {
    /// Determine breakpoint from terminal dimensions.
    pub fn from_size(width: u16, _height: u16) -> Self {
        match width {
            w if w >= 200 => Breakpoint::Wide,
            w if w >= 120 => Breakpoint::Standard,
            w if w >= 80 => Breakpoint::Compact,
            _ => Breakpoint::Minimal,
        }
    }

    /// Human-readable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Breakpoint::Minimal => "minimal",
            Breakpoint::Compact => "compact",
            Breakpoint::Standard => "standard",
            Breakpoint::Wide => "wide",
        }
    }
}

/// Layout areas for the explorer view.
#[derive(Debug, Clone, Copy)]
pub struct ExplorerAreas {
    /// Title line at top.
    pub title: Rect,
    /// Stacked bar chart area.
    pub chart: Rect,
    /// Optional legend pane (folded away on minimal terminals).
    pub legend: Option<Rect>,
    /// Status bar at bottom.
    pub status: Rect,
}

/// Responsive layout calculator.
///
/// Computes layout areas based on terminal size and current breakpoint.
/// Uses ftui's [`Flex`] solver internally for constraint-based layout.
#[derive(Debug, Clone, Copy)]
pub struct ResponsiveLayout {
    /// Terminal area.
    area: Rect,
    /// Current breakpoint.
    breakpoint: Breakpoint,
}

impl ResponsiveLayout {
    /// Create a new responsive layout for the given terminal area.
    pub fn new(area: Rect) -> Self {
        let breakpoint = Breakpoint::from_size(area.width, area.height);

        trace!(
            width = area.width,
            height = area.height,
            breakpoint = breakpoint.name(),
            "layout.calculate"
        );

        Self { area, breakpoint }
    }

    /// Get the current breakpoint.
    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    /// Get the terminal area.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Check if terminal is too small for usable display.
    pub fn is_too_small(&self) -> bool {
        self.area.width < 40 || self.area.height < 10
    }

    /// Compute explorer view layout areas.
    pub fn explorer_areas(&self) -> ExplorerAreas {
        let v_chunks = Flex::vertical()
            .constraints([
                Constraint::Fixed(1), // Title
                Constraint::Min(6),   // Chart + legend
                Constraint::Fixed(1), // Status bar
            ])
            .split(self.area);

        let (title, content, status) = (v_chunks[0], v_chunks[1], v_chunks[2]);

        let legend_pct = match self.breakpoint {
            Breakpoint::Wide => Some(20.0),
            Breakpoint::Standard => Some(25.0),
            Breakpoint::Compact => Some(30.0),
            Breakpoint::Minimal => None,
        };

        match legend_pct {
            Some(pct) => {
                let content_chunks = Flex::horizontal()
                    .constraints([
                        Constraint::Percentage(100.0 - pct), // Chart
                        Constraint::Percentage(pct),         // Legend
                    ])
                    .split(content);

                ExplorerAreas {
                    title,
                    chart: content_chunks[0],
                    legend: Some(content_chunks[1]),
                    status,
                }
            }
            None => ExplorerAreas {
                title,
                chart: content,
                legend: None,
                status,
            },
        }
    }

    /// Compute centered popup/dialog area.
    pub fn popup_area(&self, width_pct: u16, height_pct: u16) -> Rect {
        let width = (self.area.width as u32 * width_pct as u32 / 100) as u16;
        let height = (self.area.height as u32 * height_pct as u32 / 100) as u16;

        let width = width.max(30).min(self.area.width.saturating_sub(4));
        let height = height.max(10).min(self.area.height.saturating_sub(4));

        let x = (self.area.width.saturating_sub(width)) / 2;
        let y = (self.area.height.saturating_sub(height)) / 2;

        Rect::new(self.area.x + x, self.area.y + y, width, height)
    }
}

/// Tracks layout state changes for logging.
#[derive(Debug, Clone)]
pub struct LayoutState {
    /// Previous breakpoint (for transition detection).
    prev_breakpoint: Option<Breakpoint>,
    /// Current breakpoint.
    current_breakpoint: Breakpoint,
    /// Current terminal size.
    current_size: (u16, u16),
}

impl LayoutState {
    /// Create new layout state.
    pub fn new(width: u16, height: u16) -> Self {
        let breakpoint = Breakpoint::from_size(width, height);
        Self {
            prev_breakpoint: None,
            current_breakpoint: breakpoint,
            current_size: (width, height),
        }
    }

    /// Update state for new terminal size.
    ///
    /// Returns true if breakpoint changed.
    pub fn update(&mut self, width: u16, height: u16) -> bool {
        let new_breakpoint = Breakpoint::from_size(width, height);
        let changed = new_breakpoint != self.current_breakpoint;

        if changed {
            debug!(
                from = self.current_breakpoint.name(),
                to = new_breakpoint.name(),
                "layout.breakpoint_change"
            );
        }

        if self.current_size != (width, height) {
            debug!(
                old_width = self.current_size.0,
                old_height = self.current_size.1,
                new_width = width,
                new_height = height,
                "layout.resize"
            );
        }

        self.prev_breakpoint = Some(self.current_breakpoint);
        self.current_breakpoint = new_breakpoint;
        self.current_size = (width, height);

        changed
    }

    /// Get the current breakpoint.
    pub fn breakpoint(&self) -> Breakpoint {
        self.current_breakpoint
    }

    /// Get current terminal size.
    pub fn size(&self) -> (u16, u16) {
        self.current_size
    }
}
