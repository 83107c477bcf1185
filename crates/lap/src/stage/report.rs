//! Report stage: HTML summary and optional plots from analysis results.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{info, warn};

use super::{Stage, StageOutcome};
use crate::document::read_json;
use crate::error::Result;
use crate::fsutil::write_text;
use crate::plot::create_analysis_plots;
use crate::report::render_html;
use crate::table::{Delimiter, TableOptions, read_table};
use crate::validate::validate_input_file;

/// Configuration for the report stage.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Analysis results file (TSV).
    pub input_file: PathBuf,
    /// Output HTML report file.
    pub output_html: PathBuf,
    /// Output plots file, if plots are wanted.
    pub output_plots: Option<PathBuf>,
    /// Project name used in the report title.
    pub project_name: String,
    /// Optional progress log for pipeline tracking.
    pub log_file: Option<PathBuf>,
}

impl ReportConfig {
    pub fn new(
        input_file: impl Into<PathBuf>,
        output_html: impl Into<PathBuf>,
        project_name: impl Into<String>,
    ) -> Self {
        Self {
            input_file: input_file.into(),
            output_html: output_html.into(),
            output_plots: None,
            project_name: project_name.into(),
            log_file: None,
        }
    }

    pub fn with_output_plots(mut self, output_plots: Option<PathBuf>) -> Self {
        self.output_plots = output_plots;
        self
    }

    pub fn with_log_file(mut self, log_file: Option<PathBuf>) -> Self {
        self.log_file = log_file;
        self
    }

    /// Metadata record expected beside the results file.
    pub fn metadata_file(&self) -> PathBuf {
        self.input_file.with_extension("json")
    }
}

/// Stage 3: HTML report generation.
#[derive(Debug, Clone)]
pub struct ReportStage {
    config: ReportConfig,
}

impl ReportStage {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    fn load_metadata(&self) -> Result<Map<String, Value>> {
        let path = self.config.metadata_file();
        if !path.exists() {
            return Ok(Map::new());
        }

        match read_json(&path)? {
            Value::Object(map) => Ok(map),
            _ => {
                warn!("Ignoring metadata that is not a JSON object: {}", path.display());
                Ok(Map::new())
            }
        }
    }
}

impl Stage for ReportStage {
    fn name(&self) -> &'static str {
        "report"
    }

    fn validate(&self) -> Result<()> {
        validate_input_file(&self.config.input_file, None)
    }

    fn run(&self) -> Result<StageOutcome> {
        info!("Loading analysis results from: {}", self.config.input_file.display());
        let table = read_table(
            &self.config.input_file,
            &TableOptions::new().with_delimiter(Delimiter::Tab),
        )?;
        let metadata = self.load_metadata()?;

        let html = render_html(&table, &metadata, &self.config.project_name);
        write_text(&self.config.output_html, &html)?;

        let mut outcome = StageOutcome::new(format!(
            "Report generated: {}",
            self.config.output_html.display()
        ))
        .with_output(&self.config.output_html);

        if let Some(ref plots) = self.config.output_plots {
            create_analysis_plots(&table, plots)?;
            outcome = outcome.with_output(plots);
        }

        Ok(outcome)
    }

    fn log_file(&self) -> Option<&Path> {
        self.config.log_file.as_deref()
    }
}
