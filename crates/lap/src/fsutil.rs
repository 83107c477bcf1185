//! File-system helpers: directory creation, introspection and permissions.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{LapError, Result};
use crate::table::{TableOptions, is_tabular_path, read_table};

/// Create the parent directory of `path` if it does not exist.
///
/// Returns the parent directory. Succeeds when it already exists.
pub fn create_output_directory(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if !parent.exists() {
        fs::create_dir_all(&parent).map_err(|e| LapError::io(&parent, e))?;
    }

    Ok(parent)
}

/// Write text to `path`, creating missing parent directories.
pub fn write_text(path: impl AsRef<Path>, text: &str) -> Result<()> {
    let path = path.as_ref();
    create_output_directory(path)?;
    fs::write(path, text).map_err(|e| LapError::io(path, e))
}

/// Create an empty file at `path` (keeping existing contents), with parents.
pub fn touch(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    create_output_directory(path)?;
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(|_| ())
        .map_err(|e| LapError::io(path, e))
}

/// Add the user execute bit to an existing file. Missing paths are ignored.
pub fn ensure_executable(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut permissions = fs::metadata(path)
            .map_err(|e| LapError::io(path, e))?
            .permissions();
        permissions.set_mode(permissions.mode() | 0o100);
        fs::set_permissions(path, permissions).map_err(|e| LapError::io(path, e))?;
    }

    info!("Made executable: {}", path.display());
    Ok(())
}

/// Basic information about a file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_empty: Option<bool>,
    /// Extension including the leading dot, or "" when there is none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_columns: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_read_error: Option<bool>,
}

/// Describe a file. Never fails: unreadable tables set `table_read_error`.
pub fn describe(path: impl AsRef<Path>) -> FileInfo {
    let path = path.as_ref();

    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(_) => return FileInfo::default(),
    };

    let size_bytes = metadata.len();
    let is_empty = size_bytes == 0;
    let mut info = FileInfo {
        exists: true,
        size_bytes: Some(size_bytes),
        is_empty: Some(is_empty),
        extension: Some(
            path.extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_default(),
        ),
        name: Some(
            path.file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
        ),
        parent: Some(
            path.parent()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        ),
        ..FileInfo::default()
    };

    if is_tabular_path(path) && !is_empty {
        match read_table(path, &TableOptions::default()) {
            Ok(table) => {
                info.n_rows = Some(table.row_count());
                info.n_columns = Some(table.column_count());
                info.columns = Some(table.headers);
            }
            Err(_) => info.table_read_error = Some(true),
        }
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_output_directory_idempotent() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("a/b/out.json");

        let parent = create_output_directory(&target).unwrap();
        assert!(parent.is_dir());
        assert_eq!(create_output_directory(&target).unwrap(), parent);
    }

    #[test]
    fn test_create_output_directory_bare_name() {
        assert_eq!(create_output_directory("out.json").unwrap(), PathBuf::from("."));
    }

    #[test]
    fn test_describe_missing() {
        let dir = tempdir().unwrap();
        let info = describe(dir.path().join("nope.csv"));
        assert_eq!(info, FileInfo::default());
        assert_eq!(serde_json::to_string(&info).unwrap(), r#"{"exists":false}"#);
    }

    #[test]
    fn test_describe_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.tsv");
        fs::write(&path, "a\tb\n1\t2\n3\t4\n").unwrap();

        let info = describe(&path);
        assert!(info.exists);
        assert_eq!(info.extension.as_deref(), Some(".tsv"));
        assert_eq!(info.name.as_deref(), Some("data.tsv"));
        assert_eq!(info.n_rows, Some(2));
        assert_eq!(info.n_columns, Some(2));
        assert_eq!(info.columns, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(info.table_read_error, None);
    }

    #[test]
    fn test_describe_empty_table_skips_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "").unwrap();

        let info = describe(&path);
        assert_eq!(info.is_empty, Some(true));
        assert_eq!(info.n_rows, None);
        assert_eq!(info.table_read_error, None);
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("run.sh");
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        ensure_executable(&path).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o100, 0o100);

        ensure_executable(dir.path().join("missing.sh")).unwrap();
    }
}
