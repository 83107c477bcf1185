//! CLI command implementations.

pub mod all;
pub mod analyze;
pub mod inspect;
pub mod qc;
pub mod report;
pub mod validate;

use colored::Colorize;
use lap::StageOutcome;

/// Print a completed stage summary and the files it wrote.
fn print_outcome(outcome: &StageOutcome) {
    println!("{} {}", "Completed".green().bold(), outcome.summary.white());
    for path in &outcome.outputs {
        println!("  {} {}", "Saved".cyan(), path.display());
    }
}
