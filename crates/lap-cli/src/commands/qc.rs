//! QC command - missing-data checks on an input table.

use std::path::PathBuf;

use lap::stage::{QcConfig, QcStage};
use lap::{Delimiter, StageRunner};

use super::print_outcome;

pub fn run(
    input_file: PathBuf,
    output_file: PathBuf,
    log_file: Option<PathBuf>,
    delimiter: Option<Delimiter>,
    missing_threshold: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = QcConfig::new(input_file, output_file)
        .with_log_file(log_file)
        .with_delimiter(delimiter)
        .with_missing_threshold(missing_threshold);

    let outcome = StageRunner::new().execute(&QcStage::new(config))?;
    print_outcome(&outcome);
    Ok(())
}
