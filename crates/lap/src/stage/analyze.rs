//! Main analysis stage.
//!
//! The statistics themselves are supplied through [`Analyzer`]. The shipped
//! [`PlaceholderAnalyzer`] returns fixed results so the pipeline can be
//! wired end to end before domain code exists.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Stage, StageOutcome};
use crate::document::{read_json, write_json};
use crate::error::{LapError, Result};
use crate::table::{DataTable, Delimiter, TableOptions, write_table};
use crate::validate::validate_input_file;

/// QC statuses the analysis stage accepts.
const ACCEPTED_QC_STATUSES: [&str; 2] = ["PASS", "WARNING"];

/// p-value at or above which a result is not counted as significant.
pub const DEFAULT_SIGNIFICANCE: f64 = 0.05;

/// Configuration for the analysis stage.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    /// QC results file from the previous stage.
    pub input_file: PathBuf,
    /// Analysis results output file (TSV). The JSON record is written
    /// beside it with a `.json` extension.
    pub output_file: PathBuf,
    /// Optional progress log for pipeline tracking.
    pub log_file: Option<PathBuf>,
    /// Significance cutoff for counting results.
    pub significance: f64,
}

impl AnalyzeConfig {
    pub fn new(input_file: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Self {
            input_file: input_file.into(),
            output_file: output_file.into(),
            log_file: None,
            significance: DEFAULT_SIGNIFICANCE,
        }
    }

    pub fn with_log_file(mut self, log_file: Option<PathBuf>) -> Self {
        self.log_file = log_file;
        self
    }

    /// Path of the JSON record written next to the TSV output.
    pub fn json_output(&self) -> PathBuf {
        self.output_file.with_extension("json")
    }
}

/// One tested feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureResult {
    pub feature: String,
    pub p_value: f64,
    pub effect_size: f64,
}

/// Structured record of an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis_type: String,
    pub input_qc_file: String,
    pub n_significant_results: usize,
    pub top_results: Vec<FeatureResult>,
    pub analysis_status: String,
}

/// Domain analysis plugged into the stage.
pub trait Analyzer {
    /// Label written to `analysis_type`.
    fn analysis_type(&self) -> &str {
        "standard"
    }

    /// Produce per-feature results from the QC record. The stage writes
    /// them in the order returned.
    fn analyze(&self, qc: &Value) -> Result<Vec<FeatureResult>>;
}

/// Returns three fixed features regardless of input.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderAnalyzer;

impl Analyzer for PlaceholderAnalyzer {
    fn analyze(&self, _qc: &Value) -> Result<Vec<FeatureResult>> {
        Ok([
            ("feature_1", 0.001, 1.5),
            ("feature_2", 0.003, -1.2),
            ("feature_3", 0.012, 0.8),
        ]
        .into_iter()
        .map(|(feature, p_value, effect_size)| FeatureResult {
            feature: feature.to_string(),
            p_value,
            effect_size,
        })
        .collect())
    }
}

/// Tabular view of results: `feature`, `p_value`, `effect_size`.
pub fn results_table(results: &[FeatureResult]) -> DataTable {
    let mut table = DataTable::with_headers(["feature", "p_value", "effect_size"]);
    for r in results {
        table.push_row([
            r.feature.clone(),
            r.p_value.to_string(),
            r.effect_size.to_string(),
        ]);
    }
    table
}

/// Stage 2: main analysis.
#[derive(Debug, Clone)]
pub struct AnalyzeStage<A = PlaceholderAnalyzer> {
    config: AnalyzeConfig,
    analyzer: A,
}

impl AnalyzeStage<PlaceholderAnalyzer> {
    pub fn new(config: AnalyzeConfig) -> Self {
        Self::with_analyzer(config, PlaceholderAnalyzer)
    }
}

impl<A: Analyzer> AnalyzeStage<A> {
    pub fn with_analyzer(config: AnalyzeConfig, analyzer: A) -> Self {
        Self { config, analyzer }
    }

    fn check_qc_status(&self, qc: &Value) -> Result<()> {
        let status = qc.get("qc_status").and_then(Value::as_str).ok_or_else(|| {
            LapError::stage(
                self.name(),
                format!("QC results {} have no qc_status", self.config.input_file.display()),
            )
        })?;

        if !ACCEPTED_QC_STATUSES.contains(&status) {
            return Err(LapError::stage(
                self.name(),
                format!("Cannot proceed with analysis: QC status is {}", status),
            ));
        }
        Ok(())
    }
}

impl<A: Analyzer> Stage for AnalyzeStage<A> {
    fn name(&self) -> &'static str {
        "analyze"
    }

    fn validate(&self) -> Result<()> {
        validate_input_file(&self.config.input_file, None)
    }

    fn run(&self) -> Result<StageOutcome> {
        let qc = read_json(&self.config.input_file)?;
        self.check_qc_status(&qc)?;

        let results = self.analyzer.analyze(&qc)?;

        let report = AnalysisReport {
            analysis_type: self.analyzer.analysis_type().to_string(),
            input_qc_file: self.config.input_file.display().to_string(),
            n_significant_results: results
                .iter()
                .filter(|r| r.p_value < self.config.significance)
                .count(),
            top_results: results,
            analysis_status: "COMPLETED".to_string(),
        };

        let json_path = self.config.json_output();
        write_json(&report, &json_path)?;
        write_table(
            &results_table(&report.top_results),
            &self.config.output_file,
            &TableOptions::new().with_delimiter(Delimiter::Tab),
        )?;

        Ok(StageOutcome::new(format!(
            "Analysis completed: {} significant results",
            report.n_significant_results
        ))
        .with_output(json_path)
        .with_output(&self.config.output_file))
    }

    fn log_file(&self) -> Option<&Path> {
        self.config.log_file.as_deref()
    }
}
