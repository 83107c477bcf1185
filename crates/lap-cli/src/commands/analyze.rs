//! Analyze command - run the analysis stage on a QC record.

use std::path::PathBuf;

use lap::StageRunner;
use lap::stage::{AnalyzeConfig, AnalyzeStage};

use super::print_outcome;

pub fn run(
    input_file: PathBuf,
    output_file: PathBuf,
    log_file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AnalyzeConfig::new(input_file, output_file).with_log_file(log_file);

    let outcome = StageRunner::new().execute(&AnalyzeStage::new(config))?;
    print_outcome(&outcome);
    Ok(())
}
