//! The surgical case record.

use serde::{Deserialize, Serialize};

/// One observed surgical case, as loaded from the input CSV.
///
/// Records are immutable once loaded; the full in-memory collection is
/// the sole data source for a session. Field names match the CSV header
/// columns, so the struct deserializes directly from a row. Columns not
/// listed here are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Ordinal age bucket label, e.g. `"60-69"`.
    pub age_bin: String,
    /// Patient age in years.
    pub age: f64,
    /// Observed mortality rate for the case cohort.
    pub mortality_rate: f64,
    /// Patient sex as recorded.
    pub sex: String,
    /// Operation name (finer-grained than type). Empty cells become `None`.
    pub opname: Option<String>,
    /// Operation type. Empty cells become `None`.
    pub optype: Option<String>,
    /// Intraoperative estimated blood loss in mL.
    pub intraop_ebl: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_roundtrips_through_json() {
        let record = CaseRecord {
            age_bin: "60-69".to_string(),
            age: 64.0,
            mortality_rate: 0.02,
            sex: "F".to_string(),
            opname: Some("Lobectomy".to_string()),
            optype: Some("Thoracic".to_string()),
            intraop_ebl: Some(150.0),
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: CaseRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn optional_fields_accept_null() {
        let json = r#"{
            "age_bin": "70-79",
            "age": 71.0,
            "mortality_rate": 0.0,
            "sex": "M",
            "opname": null,
            "optype": null,
            "intraop_ebl": null
        }"#;
        let record: CaseRecord = serde_json::from_str(json).unwrap();
        assert!(record.opname.is_none());
        assert!(record.optype.is_none());
        assert!(record.intraop_ebl.is_none());
    }
}
