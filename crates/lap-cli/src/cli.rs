//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use lap::Delimiter;
use std::path::PathBuf;

/// LAP: workflow stages for pipeline orchestration
#[derive(Parser)]
#[command(name = "lap")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Perform quality control and validation
    Qc {
        /// Input data file
        #[arg(long)]
        input_file: PathBuf,

        /// QC results output file (JSON format)
        #[arg(long)]
        output_file: PathBuf,

        /// Optional log file for pipeline tracking
        #[arg(long)]
        log_file: Option<PathBuf>,

        /// Input delimiter (default: tab, or comma for .csv files)
        #[arg(long)]
        delimiter: Option<Delimiter>,

        /// Missing-data percentage above which QC reports a warning
        #[arg(long, default_value = "50")]
        missing_threshold: f64,
    },

    /// Run main analysis
    Analyze {
        /// QC results file from previous stage
        #[arg(long)]
        input_file: PathBuf,

        /// Analysis results output file (TSV format)
        #[arg(long)]
        output_file: PathBuf,

        /// Optional log file for pipeline tracking
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Generate HTML report
    Report {
        /// Analysis results file (TSV format)
        #[arg(long)]
        input_file: PathBuf,

        /// Output HTML report file
        #[arg(long)]
        output_html: PathBuf,

        /// Output plots file (SVG format)
        #[arg(long)]
        output_plots: Option<PathBuf>,

        /// Project name for report title
        #[arg(long)]
        project_name: String,

        /// Optional log file for pipeline tracking
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Run complete analysis workflow
    All {
        /// Show workflow guidance only
        #[arg(long)]
        help_only: bool,

        /// Input data file for the QC stage
        #[arg(long, requires_all = ["output_dir", "project_name"])]
        input_file: Option<PathBuf>,

        /// Directory receiving every stage output
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Project name for report title
        #[arg(long)]
        project_name: Option<String>,

        /// Optional log file for pipeline tracking
        #[arg(long)]
        log_file: Option<PathBuf>,

        /// QC input delimiter (default: tab, or comma for .csv files)
        #[arg(long)]
        delimiter: Option<Delimiter>,

        /// Missing-data percentage above which QC reports a warning
        #[arg(long, default_value = "50")]
        missing_threshold: f64,

        /// Also write histogram plots
        #[arg(long)]
        plots: bool,
    },

    /// Check that an input file exists, is non-empty and has required columns
    Validate {
        /// File to validate
        #[arg(long)]
        input_file: PathBuf,

        /// Required column names (comma-separated)
        #[arg(long, value_delimiter = ',')]
        required_columns: Vec<String>,
    },

    /// Show size, type and table shape of a file
    Inspect {
        /// File to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}
