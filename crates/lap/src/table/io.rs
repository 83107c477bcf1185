//! Delimited table reading and writing.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use tracing::info;

use super::data::DataTable;
use super::delimiter::Delimiter;
use crate::error::{BoxedCause, LapError, Result};
use crate::fsutil::create_output_directory;

/// Per-call overrides for table I/O.
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    /// Delimiter to use (None = infer from extension).
    pub delimiter: Option<Delimiter>,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Write a leading row-index column.
    pub index: bool,
}

impl TableOptions {
    /// Options with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit delimiter instead of inferring one.
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Stop reading after `rows` data rows.
    pub fn with_max_rows(mut self, rows: usize) -> Self {
        self.max_rows = Some(rows);
        self
    }

    /// Write a row-index column.
    pub fn with_index(mut self, index: bool) -> Self {
        self.index = index;
        self
    }

    fn delimiter_for(&self, path: &Path) -> Delimiter {
        self.delimiter.unwrap_or_else(|| Delimiter::from_path(path))
    }
}

/// Read a delimited table.
///
/// Fails with `NotFound` for a missing path, `Empty` for a zero-byte
/// file and `TableRead` for anything the parser rejects.
pub fn read_table(path: impl AsRef<Path>, options: &TableOptions) -> Result<DataTable> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LapError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = fs::read(path).map_err(|e| LapError::io(path, e))?;
    if contents.is_empty() {
        return Err(LapError::Empty {
            path: path.to_path_buf(),
        });
    }

    let delimiter = options.delimiter_for(path);
    let table = parse_bytes(&contents, delimiter, options.max_rows).map_err(|source| {
        LapError::TableRead {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!(
        "Successfully loaded table: {} ({} rows, {} columns)",
        path.display(),
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}

/// Read only the header row of a delimited file.
pub fn read_header(path: impl AsRef<Path>, delimiter: Delimiter) -> Result<Vec<String>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|source| LapError::HeaderRead {
            path: path.to_path_buf(),
            source,
        })?;

    let headers = reader.headers().map_err(|source| LapError::HeaderRead {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(headers.iter().map(|s| s.to_string()).collect())
}

/// Write a delimited table, creating missing parent directories.
///
/// A table without columns is written as an empty file. Reading that file
/// back fails with [`LapError::Empty`], so such tables do not round-trip.
pub fn write_table(table: &DataTable, path: impl AsRef<Path>, options: &TableOptions) -> Result<()> {
    let path = path.as_ref();
    create_output_directory(path)?;

    let delimiter = options.delimiter_for(path);
    write_records(table, path, delimiter, options.index).map_err(|source| {
        LapError::TableWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!(
        "Table written to: {} ({} rows, {} columns)",
        path.display(),
        table.row_count(),
        table.column_count()
    );
    Ok(())
}

fn write_records(
    table: &DataTable,
    path: &Path,
    delimiter: Delimiter,
    index: bool,
) -> std::result::Result<(), BoxedCause> {
    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter.as_byte())
        .from_writer(BufWriter::new(file));

    // A table without columns is written as an empty file.
    if table.headers.is_empty() {
        writer.flush()?;
        return Ok(());
    }

    if index {
        writer.write_record(std::iter::once("").chain(table.headers.iter().map(|h| h.as_str())))?;
        for (i, row) in table.rows.iter().enumerate() {
            let label = i.to_string();
            writer.write_record(
                std::iter::once(label.as_str()).chain(row.iter().map(|v| v.as_str())),
            )?;
        }
    } else {
        writer.write_record(&table.headers)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Parse bytes directly.
fn parse_bytes(
    bytes: &[u8],
    delimiter: Delimiter,
    max_rows: Option<usize>,
) -> std::result::Result<DataTable, BoxedCause> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();

    if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
        return Err("No columns found".into());
    }

    let mut seen = HashSet::new();
    for name in &headers {
        if !seen.insert(name.as_str()) {
            return Err(format!("Duplicate column name: {}", name).into());
        }
    }

    let expected_cols = headers.len();
    let mut table = DataTable::with_headers(headers);

    for (row_idx, result) in reader.records().enumerate() {
        if let Some(max) = max_rows {
            if row_idx >= max {
                break;
            }
        }

        let record = result?;
        if record.len() > expected_cols {
            return Err(format!(
                "Expected {} fields in line {}, saw {}",
                expected_cols,
                row_idx + 2,
                record.len()
            )
            .into());
        }

        // Short rows are padded with missing cells.
        table.push_row(record.iter());
    }

    Ok(table)
}
