//! Extension-driven delimiter inference.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Field separator for delimited text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
}

impl Delimiter {
    /// Infer the delimiter from a path's extension: `.tsv` is tab,
    /// everything else is comma. File contents are never inspected.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        if has_extension(path.as_ref(), "tsv") {
            Delimiter::Tab
        } else {
            Delimiter::Comma
        }
    }

    /// The delimiter byte handed to the CSV reader/writer.
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }
}

impl FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "," | "comma" | "csv" => Ok(Delimiter::Comma),
            "\t" | "\\t" | "tab" | "tsv" => Ok(Delimiter::Tab),
            _ => Err(format!("Unknown delimiter: {}. Use comma or tab.", s)),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Comma => write!(f, "comma"),
            Delimiter::Tab => write!(f, "tab"),
        }
    }
}

/// Whether the path names a delimited table (`.csv` or `.tsv`).
pub fn is_tabular_path(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    has_extension(path, "csv") || has_extension(path, "tsv")
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}
