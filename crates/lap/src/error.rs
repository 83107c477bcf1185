//! Error types for the LAP library.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed underlying cause carried by table read/write failures.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for LAP operations.
#[derive(Debug, Error)]
pub enum LapError {
    /// The path does not exist.
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but has zero bytes.
    #[error("File is empty: {}", path.display())]
    Empty { path: PathBuf },

    /// Header validation found required columns that are absent.
    #[error("Missing required columns in {}: {}", path.display(), missing.join(", "))]
    MissingColumns { path: PathBuf, missing: Vec<String> },

    /// The header row of a tabular file could not be parsed.
    #[error("Error reading header of {}: {source}", path.display())]
    HeaderRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Structured document (JSON) could not be parsed.
    #[error("Malformed JSON in {}: {source}", path.display())]
    MalformedDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Delimited table could not be parsed.
    #[error("Error reading table {}: {source}", path.display())]
    TableRead {
        path: PathBuf,
        #[source]
        source: BoxedCause,
    },

    /// Delimited table could not be serialized or written.
    #[error("Error writing table {}: {source}", path.display())]
    TableWrite {
        path: PathBuf,
        #[source]
        source: BoxedCause,
    },

    /// Error reading, writing or creating a file or directory.
    #[error("IO error for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stage could not complete its computation.
    #[error("Stage '{stage}' failed: {message}")]
    Stage { stage: String, message: String },
}

/// Fieldless view of [`LapError`] for matching on the failure taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Empty,
    MissingColumns,
    MalformedDocument,
    TableRead,
    TableWrite,
    Io,
    StageFailure,
}

impl LapError {
    /// The taxonomy kind of this error.
    ///
    /// Header parse failures report as [`ErrorKind::MissingColumns`]: the
    /// header could not be checked, so the required columns are not known
    /// to be present.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LapError::NotFound { .. } => ErrorKind::NotFound,
            LapError::Empty { .. } => ErrorKind::Empty,
            LapError::MissingColumns { .. } | LapError::HeaderRead { .. } => {
                ErrorKind::MissingColumns
            }
            LapError::MalformedDocument { .. } => ErrorKind::MalformedDocument,
            LapError::TableRead { .. } => ErrorKind::TableRead,
            LapError::TableWrite { .. } => ErrorKind::TableWrite,
            LapError::Io { .. } => ErrorKind::Io,
            LapError::Stage { .. } => ErrorKind::StageFailure,
        }
    }

    /// Build a stage failure.
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        LapError::Stage {
            stage: stage.into(),
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LapError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for LAP operations.
pub type Result<T> = std::result::Result<T, LapError>;
