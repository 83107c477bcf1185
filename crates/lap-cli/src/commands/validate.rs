//! Validate command - existence, emptiness and header checks.

use std::path::PathBuf;

use colored::Colorize;
use lap::validate_input_file;

pub fn run(
    input_file: PathBuf,
    required_columns: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let required: Vec<&str> = required_columns.iter().map(|s| s.as_str()).collect();
    validate_input_file(&input_file, Some(&required))?;

    println!(
        "{} {}",
        "Valid".green().bold(),
        input_file.display().to_string().white()
    );
    Ok(())
}
