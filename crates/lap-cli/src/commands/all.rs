//! All command - run every stage in sequence, or print guidance.

use std::path::PathBuf;

use colored::Colorize;
use lap::Delimiter;
use lap::stage::{GUIDANCE_STEPS, PipelineConfig, run_pipeline};

use super::print_outcome;

#[allow(clippy::too_many_arguments)]
pub fn run(
    help_only: bool,
    input_file: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    project_name: Option<String>,
    log_file: Option<PathBuf>,
    delimiter: Option<Delimiter>,
    missing_threshold: f64,
    plots: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (input_file, output_dir, project_name) = match (input_file, output_dir, project_name) {
        (Some(i), Some(o), Some(p)) if !help_only => (i, o, p),
        _ => {
            print_guidance();
            return Ok(());
        }
    };

    let config = PipelineConfig::new(input_file, output_dir, project_name)
        .with_log_file(log_file)
        .with_delimiter(delimiter)
        .with_missing_threshold(missing_threshold)
        .with_plots(plots);

    for outcome in run_pipeline(&config)? {
        print_outcome(&outcome);
    }

    println!();
    println!(
        "{} {}",
        "Report ready:".green().bold(),
        config.outputs().report_html.display().to_string().white()
    );
    Ok(())
}

fn print_guidance() {
    println!("{}", "To run the complete workflow:".cyan().bold());
    for (i, step) in GUIDANCE_STEPS.iter().enumerate() {
        println!("{}. {}", i + 1, step);
    }
    println!();
    println!(
        "Or run every stage at once with {}",
        "lap all --input-file <FILE> --output-dir <DIR> --project-name <NAME>"
            .cyan()
            .bold()
    );
}
