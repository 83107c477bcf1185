//! Structured document (JSON) reading and writing.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use crate::error::{LapError, Result};
use crate::fsutil::create_output_directory;

/// Read a JSON document.
///
/// Fails with `NotFound` for a missing path and `MalformedDocument` when
/// the contents are not valid JSON.
pub fn read_json(path: impl AsRef<Path>) -> Result<Value> {
    read_json_as(path)
}

/// Read a JSON document into a typed record.
///
/// Shape mismatches are reported as `MalformedDocument` as well.
pub fn read_json_as<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LapError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = fs::read(path).map_err(|e| LapError::io(path, e))?;
    let data = serde_json::from_slice(&contents).map_err(|source| LapError::MalformedDocument {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Successfully loaded JSON: {}", path.display());
    Ok(data)
}

/// Write a document as 2-space indented JSON, creating missing parent
/// directories. Existing files are overwritten.
pub fn write_json<T: Serialize + ?Sized>(data: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    create_output_directory(path)?;

    let file = File::create(path).map_err(|e| LapError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data).map_err(|e| {
        LapError::io(path, std::io::Error::other(e))
    })?;
    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(|e| LapError::io(path, e))?;

    info!("JSON written to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_dirs_and_indents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/qc.json");

        write_json(&json!({"qc_status": "PASS", "n_rows": 3}), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"qc_status\": \"PASS\""));
        assert_eq!(read_json(&path).unwrap()["n_rows"], 3);
    }

    #[test]
    fn test_read_missing() {
        let dir = tempdir().unwrap();
        let err = read_json(dir.path().join("missing.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_read_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{\"a\": ").unwrap();

        let err = read_json(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);
        assert!(err.to_string().starts_with("Malformed JSON in"));
    }
}
