//! Drill-down explorer session state.
//!
//! A session owns the loaded records and the current view. The overview
//! stacks operation types as fractions per age bin; clicking into (or
//! selecting) one operation type switches to a detail view that stacks
//! the raw counts of individual operation names for the matching
//! records. Every transition recomputes the layout from the records, so
//! the view can always be reset back to the overview.

use cs_common::CaseRecord;
use cs_stack::{compute_stack, SeriesKey, StackLayout, ValueMode};
use tracing::debug;

/// Which slice of the data the explorer is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// All records, operation types stacked as fractions.
    Overview,
    /// Records of one operation type, operation names stacked as counts.
    Detail { optype: SeriesKey },
}

/// Explorer state: records plus the derived layout for the current view.
#[derive(Debug, Clone)]
pub struct ExplorerSession {
    records: Vec<CaseRecord>,
    view: ViewState,
    layout: StackLayout,
}

impl ExplorerSession {
    /// Start a session at the overview.
    pub fn new(records: Vec<CaseRecord>) -> Self {
        let layout = overview_layout(&records);
        ExplorerSession {
            records,
            view: ViewState::Overview,
            layout,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn layout(&self) -> &StackLayout {
        &self.layout
    }

    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    /// Title line describing the current view.
    pub fn title(&self) -> String {
        match &self.view {
            ViewState::Overview => "Operation types by age bin".to_string(),
            ViewState::Detail { optype } => {
                format!("Operations for type '{}' by age bin", optype.label())
            }
        }
    }

    /// Drill into one operation type. A no-op when already in a detail
    /// view; reset first to drill into a different type.
    pub fn drill_down(&mut self, optype: SeriesKey) {
        if matches!(self.view, ViewState::Detail { .. }) {
            return;
        }
        debug!(optype = %optype, "drilling into operation type");
        self.layout = detail_layout(&self.records, &optype);
        self.view = ViewState::Detail { optype };
    }

    /// Return to the overview.
    pub fn reset(&mut self) {
        if self.view == ViewState::Overview {
            return;
        }
        debug!("resetting to overview");
        self.layout = overview_layout(&self.records);
        self.view = ViewState::Overview;
    }
}

fn overview_layout(records: &[CaseRecord]) -> StackLayout {
    compute_stack(
        records,
        |r| r.age_bin.clone(),
        |r| r.optype.clone(),
        ValueMode::Fraction,
    )
}

fn detail_layout(records: &[CaseRecord], optype: &SeriesKey) -> StackLayout {
    let filtered: Vec<&CaseRecord> = records
        .iter()
        .filter(|r| &SeriesKey::from(r.optype.clone()) == optype)
        .collect();
    compute_stack(
        &filtered,
        |r| r.age_bin.clone(),
        |r| r.opname.clone(),
        ValueMode::Count,
    )
}
