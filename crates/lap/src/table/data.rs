//! In-memory tabular dataset.

use indexmap::IndexMap;

/// Represents parsed tabular data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Create a table with the given columns and no rows.
    pub fn with_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Short rows are padded with empty cells and long rows
    /// are truncated to the column count.
    pub fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = row.into_iter().map(Into::into).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of cells (rows x columns).
    pub fn cell_count(&self) -> usize {
        self.row_count() * self.column_count()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Get a column by name.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.column_index(name)?;
        Some(self.column_values(index).collect())
    }

    /// Numeric values of a column. Missing and non-numeric cells are skipped.
    pub fn column_f64(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.column_index(name)?;
        Some(
            self.column_values(index)
                .filter(|v| !Self::is_null_value(v))
                .filter_map(|v| v.trim().parse::<f64>().ok())
                .collect(),
        )
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Count of missing cells per column, in header order.
    pub fn missing_by_column(&self) -> IndexMap<String, usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let missing = self
                    .column_values(i)
                    .filter(|v| Self::is_null_value(v))
                    .count();
                (name.clone(), missing)
            })
            .collect()
    }

    /// Total count of missing cells.
    pub fn missing_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .filter(|v| Self::is_null_value(v))
            .count()
    }

    /// Check if a value represents a missing/null value.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("na")
            || trimmed.eq_ignore_ascii_case("n/a")
            || trimmed.eq_ignore_ascii_case("nan")
            || trimmed.eq_ignore_ascii_case("null")
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed.eq_ignore_ascii_case("#n/a")
            || trimmed == "<NA>"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table(headers: Vec<&str>, rows: Vec<Vec<&str>>) -> DataTable {
        let mut table = DataTable::with_headers(headers);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    #[test]
    fn test_is_null_value() {
        assert!(DataTable::is_null_value(""));
        assert!(DataTable::is_null_value("NA"));
        assert!(DataTable::is_null_value("na"));
        assert!(DataTable::is_null_value("N/A"));
        assert!(DataTable::is_null_value("NaN"));
        assert!(DataTable::is_null_value("null"));
        assert!(DataTable::is_null_value("None"));
        assert!(DataTable::is_null_value("#N/A"));
        assert!(!DataTable::is_null_value("value"));
        assert!(!DataTable::is_null_value("0"));
        assert!(!DataTable::is_null_value("-"));
    }

    #[test]
    fn test_push_row_pads() {
        let table = make_table(vec!["a", "b", "c"], vec![vec!["1"]]);
        assert_eq!(table.rows[0], vec!["1", "", ""]);
        assert_eq!(table.cell_count(), 3);
    }

    #[test]
    fn test_missing_by_column_keeps_order() {
        let table = make_table(
            vec!["z", "a", "m"],
            vec![vec!["1", "", "NA"], vec!["2", "x", ""]],
        );
        let missing = table.missing_by_column();
        let keys: Vec<&str> = missing.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(missing["z"], 0);
        assert_eq!(missing["a"], 1);
        assert_eq!(missing["m"], 2);
        assert_eq!(table.missing_count(), 3);
    }

    #[test]
    fn test_column_f64_skips_missing() {
        let table = make_table(
            vec!["p_value"],
            vec![vec!["0.01"], vec!["NA"], vec!["abc"], vec![" 0.5 "]],
        );
        assert_eq!(table.column_f64("p_value"), Some(vec![0.01, 0.5]));
        assert_eq!(table.column_f64("missing"), None);
    }

    #[test]
    fn test_head() {
        let table = make_table(vec!["a"], vec![vec!["1"], vec!["2"], vec!["3"]]);
        assert_eq!(table.head(2).len(), 2);
        assert_eq!(table.head(10).len(), 3);
        assert_eq!(table.get(2, 0), Some("3"));
        assert_eq!(table.get(3, 0), None);
    }
}
