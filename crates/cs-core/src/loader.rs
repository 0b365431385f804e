//! CSV case-record loading.
//!
//! Two entry points with different strictness:
//! - [`load_cases`] is the strict loader used by every rendering
//!   command. A row with an unparsable numeric field fails the whole
//!   load with the offending row number.
//! - [`scan_cases`] is the lenient validator behind `casestack check`.
//!   It reads every row, collects per-row issues, and never aborts on
//!   bad data.

use std::fs::File;
use std::path::Path;

use cs_common::CaseRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Columns that must be present in the header row.
const REQUIRED_COLUMNS: [&str; 4] = ["age_bin", "age", "mortality_rate", "sex"];

/// Errors that abort a load.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    /// Header row is missing a required column.
    #[error("missing required column '{0}' in header")]
    MissingColumn(&'static str),

    /// A data row failed strict deserialization.
    #[error("row {row}: {source}")]
    Row { row: usize, source: csv::Error },

    /// CSV-level error (malformed file, header read failure).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One validation finding from a lenient scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowIssue {
    /// 1-based line number in the file (header is line 1).
    pub row: usize,
    /// Offending column, when attributable to one.
    pub column: Option<String>,
    pub message: String,
}

/// Outcome of a lenient scan over a data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub total_rows: usize,
    pub valid_rows: usize,
    pub issues: Vec<RowIssue>,
}

impl ScanReport {
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

fn csv_reader(path: &Path) -> Result<csv::Reader<File>> {
    let file = File::open(path).map_err(|source| LoaderError::Open {
        path: path.display().to_string(),
        source,
    })?;
    Ok(csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file))
}

/// Load all case records from a CSV file, failing on the first invalid
/// row.
///
/// Optional fields (`opname`, `optype`, `intraop_ebl`) may be empty and
/// come back as `None`; required numeric fields must parse or the load
/// fails with the 1-based row number.
pub fn load_cases(path: &Path) -> Result<Vec<CaseRecord>> {
    let mut reader = csv_reader(path)?;
    check_header(reader.headers()?)?;

    let mut records = Vec::new();
    for (i, row) in reader.deserialize::<CaseRecord>().enumerate() {
        // Header occupies line 1; the first data row is line 2.
        let record = row.map_err(|source| LoaderError::Row {
            row: i + 2,
            source,
        })?;
        records.push(record);
    }

    info!(
        path = %path.display(),
        records = records.len(),
        "case records loaded"
    );
    Ok(records)
}

/// Scan a CSV file leniently, reporting every row-level problem instead
/// of aborting. Header problems and unreadable files still fail hard.
pub fn scan_cases(path: &Path) -> Result<ScanReport> {
    let mut reader = csv_reader(path)?;
    let headers = reader.headers()?.clone();
    check_header(&headers)?;

    let column = |name: &str| headers.iter().position(|h| h == name);
    let age_col = column("age");
    let rate_col = column("mortality_rate");
    let bin_col = column("age_bin");
    let ebl_col = column("intraop_ebl");

    let mut report = ScanReport {
        total_rows: 0,
        valid_rows: 0,
        issues: Vec::new(),
    };

    for (i, row) in reader.records().enumerate() {
        let row_no = i + 2;
        report.total_rows += 1;

        let record = match row {
            Ok(record) => record,
            Err(e) => {
                report.issues.push(RowIssue {
                    row: row_no,
                    column: None,
                    message: e.to_string(),
                });
                continue;
            }
        };

        let before = report.issues.len();
        check_required_text(&record, bin_col, "age_bin", row_no, &mut report.issues);
        check_required_number(&record, age_col, "age", row_no, &mut report.issues);
        check_required_number(
            &record,
            rate_col,
            "mortality_rate",
            row_no,
            &mut report.issues,
        );
        check_optional_number(&record, ebl_col, "intraop_ebl", row_no, &mut report.issues);

        if report.issues.len() == before {
            report.valid_rows += 1;
        }
    }

    if report.has_issues() {
        warn!(
            path = %path.display(),
            issues = report.issues.len(),
            "data file has validation issues"
        );
    } else {
        info!(
            path = %path.display(),
            rows = report.total_rows,
            "data file is clean"
        );
    }
    Ok(report)
}

fn check_header(headers: &csv::StringRecord) -> Result<()> {
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(LoaderError::MissingColumn(required));
        }
    }
    Ok(())
}

fn check_required_text(
    record: &csv::StringRecord,
    col: Option<usize>,
    name: &str,
    row: usize,
    issues: &mut Vec<RowIssue>,
) {
    let value = col.and_then(|c| record.get(c)).unwrap_or("");
    if value.is_empty() {
        issues.push(RowIssue {
            row,
            column: Some(name.to_string()),
            message: "value is empty".to_string(),
        });
    }
}

fn check_required_number(
    record: &csv::StringRecord,
    col: Option<usize>,
    name: &str,
    row: usize,
    issues: &mut Vec<RowIssue>,
) {
    let value = col.and_then(|c| record.get(c)).unwrap_or("");
    if value.parse::<f64>().is_err() {
        issues.push(RowIssue {
            row,
            column: Some(name.to_string()),
            message: format!("'{}' is not a number", value),
        });
    }
}

fn check_optional_number(
    record: &csv::StringRecord,
    col: Option<usize>,
    name: &str,
    row: usize,
    issues: &mut Vec<RowIssue>,
) {
    let value = col.and_then(|c| record.get(c)).unwrap_or("");
    if !value.is_empty() && value.parse::<f64>().is_err() {
        issues.push(RowIssue {
            row,
            column: Some(name.to_string()),
            message: format!("'{}' is not a number", value),
        });
    }
}
