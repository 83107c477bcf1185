//! Append-only progress log shared by sequential stage runs.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{LapError, Result};
use crate::fsutil::create_output_directory;

/// A plain-text file that each stage appends one line to.
#[derive(Debug, Clone)]
pub struct ProgressLog {
    path: PathBuf,
}

impl ProgressLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `line` followed by a newline. No locking: stages run one at a time.
    pub fn append(&self, line: &str) -> Result<()> {
        create_output_directory(&self.path)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| LapError::io(&self.path, e))?;
        writeln!(file, "{}", line).map_err(|e| LapError::io(&self.path, e))
    }
}
