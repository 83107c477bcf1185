//! Input file validation.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{LapError, Result};
use crate::table::{Delimiter, is_tabular_path, read_header};

/// Check that an input file exists, is non-empty and, for `.csv`/`.tsv`
/// files, that its header contains every required column.
///
/// Only the header row is read. Missing names are reported in the order
/// they were requested.
pub fn validate_input_file(path: impl AsRef<Path>, required_columns: Option<&[&str]>) -> Result<()> {
    let path = path.as_ref();

    let metadata = fs::metadata(path).map_err(|_| LapError::NotFound {
        path: path.to_path_buf(),
    })?;

    if metadata.len() == 0 {
        return Err(LapError::Empty {
            path: path.to_path_buf(),
        });
    }

    if let Some(required) = required_columns.filter(|r| !r.is_empty()) {
        if is_tabular_path(path) {
            let headers = read_header(path, Delimiter::from_path(path))?;
            let present: HashSet<&str> = headers.iter().map(|h| h.as_str()).collect();

            let mut missing: Vec<String> = Vec::new();
            for name in required {
                if !present.contains(name) && !missing.iter().any(|m| m == name) {
                    missing.push(name.to_string());
                }
            }

            if !missing.is_empty() {
                return Err(LapError::MissingColumns {
                    path: path.to_path_buf(),
                    missing,
                });
            }
        }
    }

    info!("Input validation passed: {}", path.display());
    Ok(())
}
