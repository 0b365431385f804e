//! The aggregation-and-stack computation.

use std::collections::{BTreeSet, HashMap};

use super::key::{GroupKey, SeriesKey};
use super::layout::{GroupStack, Segment, StackLayout, ValueMode};

/// Derive stacked-segment geometry from a slice of records.
///
/// Records are partitioned into groups by `group_key`, every distinct
/// series key across the whole input defines the (global) stack order,
/// and each group gets one segment per series key — zero-width when the
/// series does not occur in that group. Groups come out in axis order:
/// descending by the numeric lower bound of the bin label.
///
/// The input is never mutated and the result is fully determined by the
/// input, so identical calls produce identical segment boundaries.
pub fn compute_stack<R>(
    records: &[R],
    group_key: impl Fn(&R) -> String,
    series_key: impl Fn(&R) -> Option<String>,
    mode: ValueMode,
) -> StackLayout {
    if records.is_empty() {
        return StackLayout::empty(mode);
    }

    // Partition into groups, keeping every distinct group key.
    let mut group_index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(GroupKey, Vec<SeriesKey>)> = Vec::new();
    let mut series_set: BTreeSet<SeriesKey> = BTreeSet::new();

    for record in records {
        let label = group_key(record);
        let series = SeriesKey::from(series_key(record));
        series_set.insert(series.clone());

        let idx = *group_index.entry(label.clone()).or_insert_with(|| {
            groups.push((GroupKey::new(label), Vec::new()));
            groups.len() - 1
        });
        groups[idx].1.push(series);
    }

    groups.sort_by(|(a, _), (b, _)| a.axis_cmp(b));

    // BTreeSet iteration already yields the stack order: ascending keys,
    // Missing last.
    let series: Vec<SeriesKey> = series_set.into_iter().collect();

    let groups = groups
        .into_iter()
        .map(|(key, members)| {
            let total = members.len();
            let mut counts: HashMap<&SeriesKey, usize> = HashMap::new();
            for s in &members {
                *counts.entry(s).or_default() += 1;
            }

            let mut baseline = 0.0;
            let segments = series
                .iter()
                .map(|s| {
                    let count = counts.get(s).copied().unwrap_or(0);
                    let value = match mode {
                        ValueMode::Fraction => count as f64 / total as f64,
                        ValueMode::Count => count as f64,
                    };
                    let segment = Segment {
                        series: s.clone(),
                        start: baseline,
                        end: baseline + value,
                    };
                    baseline += value;
                    segment
                })
                .collect();

            GroupStack {
                key,
                total,
                segments,
            }
        })
        .collect();

    StackLayout {
        mode,
        series,
        groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::layout::FRACTION_TOLERANCE;

    struct Case {
        age_bin: &'static str,
        optype: Option<&'static str>,
    }

    fn case(age_bin: &'static str, optype: Option<&'static str>) -> Case {
        Case { age_bin, optype }
    }

    fn stack(records: &[Case], mode: ValueMode) -> StackLayout {
        compute_stack(
            records,
            |c| c.age_bin.to_string(),
            |c| c.optype.map(str::to_string),
            mode,
        )
    }

    #[test]
    fn empty_input_yields_empty_layout() {
        let layout = stack(&[], ValueMode::Fraction);
        assert!(layout.is_empty());
        assert!(layout.series.is_empty());
    }

    #[test]
    fn three_record_fraction_scenario() {
        let records = [
            case("20-29", Some("A")),
            case("20-29", Some("B")),
            case("30-39", Some("A")),
        ];
        let layout = stack(&records, ValueMode::Fraction);

        let group_labels: Vec<&str> = layout.groups.iter().map(|g| g.key.label()).collect();
        assert_eq!(group_labels, ["30-39", "20-29"]);
        assert_eq!(
            layout.series,
            vec![
                SeriesKey::Key("A".to_string()),
                SeriesKey::Key("B".to_string())
            ]
        );

        let thirties = layout.group("30-39").unwrap();
        assert_eq!(thirties.segments[0].start, 0.0);
        assert_eq!(thirties.segments[0].end, 1.0);
        // B is absent from 30-39 but still reserves its slot.
        assert!(thirties.segments[1].is_degenerate());

        let twenties = layout.group("20-29").unwrap();
        assert_eq!(twenties.segments[0].start, 0.0);
        assert_eq!(twenties.segments[0].end, 0.5);
        assert_eq!(twenties.segments[1].start, 0.5);
        assert_eq!(twenties.segments[1].end, 1.0);
    }

    #[test]
    fn fraction_groups_sum_to_one() {
        let records = [
            case("40-49", Some("A")),
            case("40-49", Some("B")),
            case("40-49", Some("B")),
            case("60-69", Some("C")),
        ];
        let layout = stack(&records, ValueMode::Fraction);
        for group in &layout.groups {
            assert!((group.baseline_end() - 1.0).abs() < FRACTION_TOLERANCE);
        }
    }

    #[test]
    fn count_groups_sum_to_group_size() {
        let records = [
            case("40-49", Some("A")),
            case("40-49", Some("B")),
            case("40-49", Some("B")),
            case("60-69", Some("C")),
        ];
        let layout = stack(&records, ValueMode::Count);
        assert_eq!(layout.group("40-49").unwrap().baseline_end(), 3.0);
        assert_eq!(layout.group("60-69").unwrap().baseline_end(), 1.0);
        assert_eq!(layout.axis_max(), 3.0);
    }

    #[test]
    fn missing_series_key_counts_as_its_own_series() {
        let records = [
            case("50-59", Some("A")),
            case("50-59", None),
            case("50-59", None),
        ];
        let layout = stack(&records, ValueMode::Count);

        assert_eq!(
            layout.series,
            vec![SeriesKey::Key("A".to_string()), SeriesKey::Missing]
        );
        let group = layout.group("50-59").unwrap();
        assert_eq!(group.segment(&SeriesKey::Missing).unwrap().value(), 2.0);
        // No record is dropped: totals still match the group size.
        assert_eq!(group.baseline_end(), group.total as f64);
    }

    #[test]
    fn group_axis_orders_bins_descending() {
        let records = [
            case("40-49", Some("A")),
            case("60-69", Some("A")),
            case("20-29", Some("A")),
        ];
        let layout = stack(&records, ValueMode::Fraction);
        let labels: Vec<&str> = layout.groups.iter().map(|g| g.key.label()).collect();
        assert_eq!(labels, ["60-69", "40-49", "20-29"]);
    }

    #[test]
    fn series_order_is_global_across_groups() {
        // "Z" appears only in one group but reserves a slot everywhere.
        let records = [
            case("20-29", Some("Z")),
            case("30-39", Some("A")),
            case("30-39", Some("M")),
        ];
        let layout = stack(&records, ValueMode::Fraction);
        let order: Vec<&str> = layout.series.iter().map(SeriesKey::label).collect();
        assert_eq!(order, ["A", "M", "Z"]);
        for group in &layout.groups {
            assert_eq!(group.segments.len(), 3);
        }
    }

    #[test]
    fn identical_inputs_produce_identical_boundaries() {
        let records = [
            case("20-29", Some("B")),
            case("20-29", None),
            case("70-79", Some("A")),
            case("70-79", Some("B")),
        ];
        let a = stack(&records, ValueMode::Fraction);
        let b = stack(&records, ValueMode::Fraction);
        assert_eq!(a, b);
    }
}
