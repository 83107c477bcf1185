//! Tabular datasets and delimited-file I/O.

mod data;
mod delimiter;
mod io;

pub use data::DataTable;
pub use delimiter::{Delimiter, is_tabular_path};
pub use io::{TableOptions, read_header, read_table, write_table};
