//! Report command - render analysis results as HTML.

use std::path::PathBuf;

use lap::StageRunner;
use lap::stage::{ReportConfig, ReportStage};

use super::print_outcome;

pub fn run(
    input_file: PathBuf,
    output_html: PathBuf,
    output_plots: Option<PathBuf>,
    project_name: String,
    log_file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = ReportConfig::new(input_file, output_html, project_name)
        .with_output_plots(output_plots)
        .with_log_file(log_file);

    let outcome = StageRunner::new().execute(&ReportStage::new(config))?;
    print_outcome(&outcome);
    Ok(())
}
