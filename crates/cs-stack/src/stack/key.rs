//! Group and series key types.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A group key on the chart's category axis: an age-bin label in
/// `"<lo>-<hi>"` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(String);

impl GroupKey {
    pub fn new(label: impl Into<String>) -> Self {
        GroupKey(label.into())
    }

    /// The raw bin label.
    pub fn label(&self) -> &str {
        &self.0
    }

    /// Numeric lower bound parsed from the label, `None` if the text
    /// before the first `-` is not a number.
    pub fn lower_bound(&self) -> Option<f64> {
        self.0.split('-').next()?.trim().parse().ok()
    }

    /// Ordering for the group axis: descending by parsed lower bound.
    ///
    /// Bins are disjoint so parsable labels never tie on the bound;
    /// unparsable labels sort after all parsable ones, stably by label,
    /// so one bad bin cannot poison the whole axis.
    pub fn axis_cmp(&self, other: &Self) -> Ordering {
        match (self.lower_bound(), other.lower_bound()) {
            (Some(a), Some(b)) => b.total_cmp(&a).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A series key within a group's stack.
///
/// A record whose series field is absent still occupies a stack slot:
/// it is counted under [`SeriesKey::Missing`], never dropped. The derived
/// ordering is the stack order — present keys ascending, `Missing` last.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKey {
    /// A present categorical value.
    Key(String),
    /// The series field was absent/null on the record.
    Missing,
}

impl SeriesKey {
    /// Display label; `Missing` renders as `(none)`.
    pub fn label(&self) -> &str {
        match self {
            SeriesKey::Key(s) => s,
            SeriesKey::Missing => "(none)",
        }
    }
}

impl From<Option<String>> for SeriesKey {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(s) => SeriesKey::Key(s),
            None => SeriesKey::Missing,
        }
    }
}

impl std::fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_bound_parses_leading_number() {
        assert_eq!(GroupKey::new("60-69").lower_bound(), Some(60.0));
        assert_eq!(GroupKey::new("0-9").lower_bound(), Some(0.0));
        assert_eq!(GroupKey::new("unknown").lower_bound(), None);
        assert_eq!(GroupKey::new("").lower_bound(), None);
    }

    #[test]
    fn axis_order_is_descending_by_lower_bound() {
        let mut keys = vec![
            GroupKey::new("40-49"),
            GroupKey::new("60-69"),
            GroupKey::new("20-29"),
        ];
        keys.sort_by(|a, b| a.axis_cmp(b));
        let labels: Vec<&str> = keys.iter().map(|k| k.label()).collect();
        assert_eq!(labels, ["60-69", "40-49", "20-29"]);
    }

    #[test]
    fn unparsable_labels_sort_last() {
        let mut keys = vec![
            GroupKey::new("n/a"),
            GroupKey::new("30-39"),
            GroupKey::new("90-99"),
        ];
        keys.sort_by(|a, b| a.axis_cmp(b));
        let labels: Vec<&str> = keys.iter().map(|k| k.label()).collect();
        assert_eq!(labels, ["90-99", "30-39", "n/a"]);
    }

    #[test]
    fn series_keys_order_ascending_with_missing_last() {
        let mut keys = vec![
            SeriesKey::Missing,
            SeriesKey::Key("Vascular".to_string()),
            SeriesKey::Key("Biliary".to_string()),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                SeriesKey::Key("Biliary".to_string()),
                SeriesKey::Key("Vascular".to_string()),
                SeriesKey::Missing,
            ]
        );
    }

    #[test]
    fn missing_series_key_displays_as_none() {
        assert_eq!(SeriesKey::Missing.to_string(), "(none)");
        assert_eq!(SeriesKey::from(None).label(), "(none)");
        assert_eq!(
            SeriesKey::from(Some("Hepatic".to_string())).label(),
            "Hepatic"
        );
    }
}
