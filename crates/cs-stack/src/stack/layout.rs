//! Stacked-segment geometry types.

use serde::{Deserialize, Serialize};

use super::key::{GroupKey, SeriesKey};

/// Tolerance for the FRACTION-mode "baselines sum to 1" guarantee.
pub const FRACTION_TOLERANCE: f64 = 1e-9;

/// How segment values are computed within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueMode {
    /// Value = records matching the series key / group size. Segments in
    /// a non-empty group sum to 1.
    #[default]
    Fraction,
    /// Value = raw count of matching records. Segments sum to the group
    /// size.
    Count,
}

/// One stacked interval for a (group, series key) pair.
///
/// `start`/`end` are in value space; a series key absent from the group
/// still reserves a zero-width segment at its stack position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub series: SeriesKey,
    pub start: f64,
    pub end: f64,
}

impl Segment {
    /// The segment's value (interval width).
    pub fn value(&self) -> f64 {
        self.end - self.start
    }

    /// True for the zero-width segments of series absent from the group.
    pub fn is_degenerate(&self) -> bool {
        self.value() == 0.0
    }
}

/// All segments for one group, in the fixed series order.
///
/// Segments partition `[0, total]` contiguously with no gaps or
/// overlaps; this is the central invariant of the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStack {
    pub key: GroupKey,
    /// Number of records in the group.
    pub total: usize,
    pub segments: Vec<Segment>,
}

impl GroupStack {
    /// The final baseline: 1.0 (FRACTION) or the group size (COUNT) for
    /// any non-empty group.
    pub fn baseline_end(&self) -> f64 {
        self.segments.last().map_or(0.0, |s| s.end)
    }

    /// Look up the segment for a series key.
    pub fn segment(&self, series: &SeriesKey) -> Option<&Segment> {
        self.segments.iter().find(|s| &s.series == series)
    }
}

/// The full derived structure: ordered groups, the global series order,
/// and the value mode. Derived fresh on every render; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackLayout {
    pub mode: ValueMode,
    /// Global stack order, ascending with `Missing` last.
    pub series: Vec<SeriesKey>,
    /// Groups in axis order (descending by bin lower bound).
    pub groups: Vec<GroupStack>,
}

impl StackLayout {
    /// An empty layout for the given mode.
    pub fn empty(mode: ValueMode) -> Self {
        StackLayout {
            mode,
            series: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of records across all groups.
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.total).sum()
    }

    /// Upper end of the value axis: 1.0 in FRACTION mode, the largest
    /// group total in COUNT mode.
    pub fn axis_max(&self) -> f64 {
        match self.mode {
            ValueMode::Fraction => 1.0,
            ValueMode::Count => self
                .groups
                .iter()
                .map(GroupStack::baseline_end)
                .fold(0.0, f64::max),
        }
    }

    /// Look up a group by its bin label.
    pub fn group(&self, label: &str) -> Option<&GroupStack> {
        self.groups.iter().find(|g| g.key.label() == label)
    }
}
