//! Quality control stage: missing-data statistics and a pass/warning status.

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{Stage, StageOutcome};
use crate::document::write_json;
use crate::error::Result;
use crate::table::{DataTable, Delimiter, TableOptions, read_table};
use crate::validate::validate_input_file;

/// Missing-data percentage above which QC reports a warning.
pub const DEFAULT_MISSING_THRESHOLD: f64 = 50.0;

/// Configuration for the QC stage.
#[derive(Debug, Clone)]
pub struct QcConfig {
    /// Input data file.
    pub input_file: PathBuf,
    /// QC results output file (JSON).
    pub output_file: PathBuf,
    /// Optional progress log for pipeline tracking.
    pub log_file: Option<PathBuf>,
    /// Delimiter override (None = tab, or comma for `.csv`).
    pub delimiter: Option<Delimiter>,
    /// Missing-data percentage that triggers a warning.
    pub missing_threshold: f64,
}

impl QcConfig {
    pub fn new(input_file: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Self {
            input_file: input_file.into(),
            output_file: output_file.into(),
            log_file: None,
            delimiter: None,
            missing_threshold: DEFAULT_MISSING_THRESHOLD,
        }
    }

    pub fn with_log_file(mut self, log_file: Option<PathBuf>) -> Self {
        self.log_file = log_file;
        self
    }

    pub fn with_delimiter(mut self, delimiter: Option<Delimiter>) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_missing_threshold(mut self, threshold: f64) -> Self {
        self.missing_threshold = threshold;
        self
    }

    /// QC inputs are tab-delimited unless they are named `.csv`.
    fn resolved_delimiter(&self) -> Delimiter {
        self.delimiter.unwrap_or(if is_csv(&self.input_file) {
            Delimiter::Comma
        } else {
            Delimiter::Tab
        })
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Outcome of the QC checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QcStatus {
    Pass,
    Warning,
}

impl fmt::Display for QcStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QcStatus::Pass => write!(f, "PASS"),
            QcStatus::Warning => write!(f, "WARNING"),
        }
    }
}

/// Machine-readable QC record written by the stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QcReport {
    pub input_file: String,
    pub n_rows: usize,
    pub n_columns: usize,
    pub columns: Vec<String>,
    /// Missing cells per column, in header order.
    pub missing_data_summary: IndexMap<String, usize>,
    pub missing_percent: f64,
    pub qc_status: QcStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Compute QC statistics for a loaded table.
///
/// A table without cells has 0% missing data and passes.
pub fn compute_qc(table: &DataTable, input_file: &str, missing_threshold: f64) -> QcReport {
    let cells = table.cell_count();
    let missing_percent = if cells == 0 {
        0.0
    } else {
        table.missing_count() as f64 / cells as f64 * 100.0
    };

    let (qc_status, warning) = if missing_percent > missing_threshold {
        (
            QcStatus::Warning,
            Some(format!("High missing data: {:.1}%", missing_percent)),
        )
    } else {
        (QcStatus::Pass, None)
    };

    QcReport {
        input_file: input_file.to_string(),
        n_rows: table.row_count(),
        n_columns: table.column_count(),
        columns: table.headers.clone(),
        missing_data_summary: table.missing_by_column(),
        missing_percent,
        qc_status,
        warning,
    }
}

/// Stage 1: quality control and data validation.
#[derive(Debug, Clone)]
pub struct QcStage {
    config: QcConfig,
}

impl QcStage {
    pub fn new(config: QcConfig) -> Self {
        Self { config }
    }
}

impl Stage for QcStage {
    fn name(&self) -> &'static str {
        "qc"
    }

    fn validate(&self) -> Result<()> {
        validate_input_file(&self.config.input_file, None)
    }

    fn run(&self) -> Result<StageOutcome> {
        let options = TableOptions::new().with_delimiter(self.config.resolved_delimiter());
        let table = read_table(&self.config.input_file, &options)?;

        let report = compute_qc(
            &table,
            &self.config.input_file.display().to_string(),
            self.config.missing_threshold,
        );
        write_json(&report, &self.config.output_file)?;

        Ok(StageOutcome::new(format!("QC completed: {}", report.qc_status))
            .with_output(&self.config.output_file))
    }

    fn log_file(&self) -> Option<&Path> {
        self.config.log_file.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_delimiter() {
        let tsv = QcConfig::new("in.tsv", "qc.json");
        let csv = QcConfig::new("in.csv", "qc.json");
        let txt = QcConfig::new("in.txt", "qc.json");
        let forced = QcConfig::new("in.txt", "qc.json").with_delimiter(Some(Delimiter::Comma));

        assert_eq!(tsv.resolved_delimiter(), Delimiter::Tab);
        assert_eq!(csv.resolved_delimiter(), Delimiter::Comma);
        assert_eq!(txt.resolved_delimiter(), Delimiter::Tab);
        assert_eq!(forced.resolved_delimiter(), Delimiter::Comma);
    }

    #[test]
    fn test_compute_qc_pass() {
        let mut table = DataTable::with_headers(["a", "b"]);
        table.push_row(["1", ""]);
        table.push_row(["2", "x"]);

        let report = compute_qc(&table, "in.tsv", DEFAULT_MISSING_THRESHOLD);
        assert_eq!(report.qc_status, QcStatus::Pass);
        assert_eq!(report.missing_percent, 25.0);
        assert_eq!(report.missing_data_summary["b"], 1);
        assert!(report.warning.is_none());
    }

    #[test]
    fn test_compute_qc_warning() {
        let mut table = DataTable::with_headers(["a", "b"]);
        table.push_row(["NA", ""]);
        table.push_row(["2", "NaN"]);

        let report = compute_qc(&table, "in.tsv", DEFAULT_MISSING_THRESHOLD);
        assert_eq!(report.qc_status, QcStatus::Warning);
        assert_eq!(report.warning.as_deref(), Some("High missing data: 75.0%"));
    }

    #[test]
    fn test_exactly_threshold_passes() {
        let mut table = DataTable::with_headers(["a", "b"]);
        table.push_row(["1", ""]);

        let report = compute_qc(&table, "in.tsv", DEFAULT_MISSING_THRESHOLD);
        assert_eq!(report.qc_status, QcStatus::Pass);
    }

    #[test]
    fn test_empty_table_passes() {
        let table = DataTable::with_headers(["a"]);
        let report = compute_qc(&table, "in.tsv", DEFAULT_MISSING_THRESHOLD);
        assert_eq!(report.missing_percent, 0.0);
        assert_eq!(report.qc_status, QcStatus::Pass);
    }

    #[test]
    fn test_status_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&QcStatus::Warning).unwrap(), "\"WARNING\"");
    }
}
