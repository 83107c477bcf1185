//! Inspect command - print file information as JSON.

use std::path::PathBuf;

use lap::describe;

pub fn run(file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let info = describe(&file);
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}
