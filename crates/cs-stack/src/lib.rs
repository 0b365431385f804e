//! casestack aggregation-and-stack engine.
//!
//! Pure, deterministic derivation of stacked-bar geometry from case
//! records. No I/O and no rendering: callers hand in a slice of records
//! plus key-extraction closures and get back a [`StackLayout`] ready for
//! drawing.

pub mod stack;

pub use stack::engine::compute_stack;
pub use stack::key::{GroupKey, SeriesKey};
pub use stack::layout::{GroupStack, Segment, StackLayout, ValueMode, FRACTION_TOLERANCE};
