//! Sequential `qc -> analyze -> report` orchestration.

use std::path::PathBuf;

use tracing::info;

use super::qc::DEFAULT_MISSING_THRESHOLD;
use super::{
    AnalyzeConfig, AnalyzeStage, QcConfig, QcStage, ReportConfig, ReportStage, Stage,
    StageOutcome, StageRunner,
};
use crate::error::Result;
use crate::table::Delimiter;

/// Steps printed when the complete workflow is requested without inputs.
pub const GUIDANCE_STEPS: [&str; 3] = [
    "First run QC stage",
    "Then run analysis stage",
    "Finally run result generation",
];

/// Configuration for running every stage in order.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Input data file for the QC stage.
    pub input_file: PathBuf,
    /// Directory receiving every stage output.
    pub output_dir: PathBuf,
    /// Project name used in the report title.
    pub project_name: String,
    /// Optional progress log shared by all stages.
    pub log_file: Option<PathBuf>,
    /// QC input delimiter override.
    pub delimiter: Option<Delimiter>,
    /// Missing-data percentage that triggers a QC warning.
    pub missing_threshold: f64,
    /// Also write histogram plots.
    pub plots: bool,
}

impl PipelineConfig {
    pub fn new(
        input_file: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        project_name: impl Into<String>,
    ) -> Self {
        Self {
            input_file: input_file.into(),
            output_dir: output_dir.into(),
            project_name: project_name.into(),
            log_file: None,
            delimiter: None,
            missing_threshold: DEFAULT_MISSING_THRESHOLD,
            plots: false,
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

    pub fn with_plots(mut self, plots: bool) -> Self {
        self.plots = plots;
        self
    }

    /// Output locations inside `output_dir`.
    pub fn outputs(&self) -> PipelineOutputs {
        let dir = &self.output_dir;
        PipelineOutputs {
            qc_json: dir.join("qc_results.json"),
            analysis_tsv: dir.join("analysis_results.tsv"),
            analysis_json: dir.join("analysis_results.json"),
            report_html: dir.join("report.html"),
            plots: self.plots.then(|| dir.join("plots.svg")),
        }
    }
}

/// Files produced by a full pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutputs {
    pub qc_json: PathBuf,
    pub analysis_tsv: PathBuf,
    pub analysis_json: PathBuf,
    pub report_html: PathBuf,
    pub plots: Option<PathBuf>,
}

/// Run QC, analysis and report in order, stopping at the first failure.
pub fn run_pipeline(config: &PipelineConfig) -> Result<Vec<StageOutcome>> {
    info!("Running complete analysis workflow");
    let outputs = config.outputs();

    let stages: Vec<Box<dyn Stage>> = vec![
        Box::new(QcStage::new(
            QcConfig::new(&config.input_file, &outputs.qc_json)
                .with_log_file(config.log_file.clone())
                .with_delimiter(config.delimiter)
                .with_missing_threshold(config.missing_threshold),
        )),
        Box::new(AnalyzeStage::new(
            AnalyzeConfig::new(&outputs.qc_json, &outputs.analysis_tsv)
                .with_log_file(config.log_file.clone()),
        )),
        Box::new(ReportStage::new(
            ReportConfig::new(
                &outputs.analysis_tsv,
                &outputs.report_html,
                config.project_name.clone(),
            )
            .with_output_plots(outputs.plots.clone())
            .with_log_file(config.log_file.clone()),
        )),
    ];

    let mut completed = Vec::with_capacity(stages.len());
    for stage in &stages {
        completed.push(StageRunner::new().execute(stage.as_ref())?);
    }
    Ok(completed)
}
