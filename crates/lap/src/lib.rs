//! LAP: workflow stage toolkit for pipeline orchestration.
//!
//! Each pipeline stage validates its input, loads a table or JSON record,
//! computes a result and writes it back out. This crate provides the
//! pieces those stages share.
//!
//! # Core Principles
//!
//! - **Fail fast**: missing or empty inputs are rejected before any processing
//! - **No pre-created directories**: every write creates its parent directories
//! - **Extension-driven formats**: `.tsv` is tab-delimited, everything else comma
//!
//! # Example
//!
//! ```no_run
//! use lap::stage::{QcConfig, QcStage, StageRunner};
//!
//! let stage = QcStage::new(QcConfig::new("data/samples.tsv", "results/qc.json"));
//! let outcome = StageRunner::new().execute(&stage).unwrap();
//!
//! println!("{}", outcome.summary);
//! ```

pub mod document;
pub mod error;
pub mod fsutil;
pub mod plot;
pub mod report;
pub mod stage;
pub mod table;
pub mod validate;

pub use document::{read_json, read_json_as, write_json};
pub use error::{ErrorKind, LapError, Result};
pub use fsutil::{FileInfo, create_output_directory, describe, ensure_executable};
pub use report::render_html;
pub use stage::{Stage, StageOutcome, StageRunner, StageState};
pub use table::{DataTable, Delimiter, TableOptions, read_table, write_table};
pub use validate::validate_input_file;
