//! LAP CLI - run pipeline workflow stages.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};
use tracing::{error, info, warn};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = ctrlc::set_handler(|| {
        info!("Workflow interrupted by user");
        std::process::exit(1);
    }) {
        warn!("Could not install interrupt handler: {}", e);
    }

    let result = match cli.command {
        Commands::Qc {
            input_file,
            output_file,
            log_file,
            delimiter,
            missing_threshold,
        } => commands::qc::run(input_file, output_file, log_file, delimiter, missing_threshold),

        Commands::Analyze {
            input_file,
            output_file,
            log_file,
        } => commands::analyze::run(input_file, output_file, log_file),

        Commands::Report {
            input_file,
            output_html,
            output_plots,
            project_name,
            log_file,
        } => commands::report::run(input_file, output_html, output_plots, project_name, log_file),

        Commands::All {
            help_only,
            input_file,
            output_dir,
            project_name,
            log_file,
            delimiter,
            missing_threshold,
            plots,
        } => commands::all::run(
            help_only,
            input_file,
            output_dir,
            project_name,
            log_file,
            delimiter,
            missing_threshold,
            plots,
        ),

        Commands::Validate {
            input_file,
            required_columns,
        } => commands::validate::run(input_file, required_columns),

        Commands::Inspect { file } => commands::inspect::run(file),
    };

    if let Err(e) = result {
        error!("Workflow failed: {}", e);
        std::process::exit(1);
    }
}
