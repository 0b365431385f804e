//! Summary statistics over loaded case records.

use cs_common::{CaseRecord, SortOrder};
use cs_stack::GroupKey;
use serde::{Deserialize, Serialize};

/// Record count for one age bin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinCount {
    pub label: String,
    pub count: usize,
}

/// Record counts per age bin plus the overall total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSummary {
    pub total: usize,
    pub bins: Vec<BinCount>,
}

/// Count records per age bin, ordered by the bin's numeric lower bound.
///
/// `Descending` matches the chart's category axis; `Ascending` reverses
/// it for reading top-down tables oldest-last.
pub fn summarize(records: &[CaseRecord], order: SortOrder) -> CaseSummary {
    let mut bins: Vec<(GroupKey, usize)> = Vec::new();
    for record in records {
        let key = GroupKey::new(record.age_bin.clone());
        match bins.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += 1,
            None => bins.push((key, 1)),
        }
    }

    bins.sort_by(|(a, _), (b, _)| a.axis_cmp(b));
    if order == SortOrder::Ascending {
        bins.reverse();
    }

    CaseSummary {
        total: records.len(),
        bins: bins
            .into_iter()
            .map(|(key, count)| BinCount {
                label: key.label().to_string(),
                count,
            })
            .collect(),
    }
}

impl From<&CaseSummary> for cs_chart::StatsBlock {
    fn from(summary: &CaseSummary) -> Self {
        cs_chart::StatsBlock {
            total: summary.total,
            bins: summary
                .bins
                .iter()
                .map(|b| cs_chart::BinLine {
                    label: b.label.clone(),
                    count: b.count,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(age_bin: &str) -> CaseRecord {
        CaseRecord {
            age_bin: age_bin.to_string(),
            age: 50.0,
            mortality_rate: 0.05,
            sex: "F".to_string(),
            opname: None,
            optype: None,
            intraop_ebl: None,
        }
    }

    #[test]
    fn counts_per_bin_descending_by_default() {
        let records = [
            record("20-29"),
            record("60-69"),
            record("20-29"),
            record("40-49"),
        ];
        let summary = summarize(&records, SortOrder::Descending);
        assert_eq!(summary.total, 4);
        let labels: Vec<&str> = summary.bins.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["60-69", "40-49", "20-29"]);
        assert_eq!(summary.bins[2].count, 2);
    }

    #[test]
    fn ascending_order_reverses_bins() {
        let records = [record("20-29"), record("60-69")];
        let summary = summarize(&records, SortOrder::Ascending);
        let labels: Vec<&str> = summary.bins.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["20-29", "60-69"]);
    }

    #[test]
    fn empty_input_gives_empty_summary() {
        let summary = summarize(&[], SortOrder::Descending);
        assert_eq!(summary.total, 0);
        assert!(summary.bins.is_empty());
    }

    #[test]
    fn converts_to_stats_block() {
        let summary = summarize(&[record("20-29")], SortOrder::Descending);
        let block = cs_chart::StatsBlock::from(&summary);
        assert_eq!(block.total, 1);
        assert_eq!(block.bins[0].label, "20-29");
    }
}
