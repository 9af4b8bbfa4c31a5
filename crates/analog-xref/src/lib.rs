//! Dump/assessment cross-reference.
//!
//! This crate joins two header-indexed CSV datasets on a direct-number (DN)
//! column and fills the assessment's house-pair (HP) column from the dump.
//!
//! # Pipeline
//!
//! - **Read**: [`TabularReader`] yields the header row, then data rows lazily
//! - **Resolve**: [`HeaderIndex`] finds columns by case-insensitive name
//! - **Index**: [`CrossRefIndex`] maps dump DN values to HP values (last write wins)
//! - **Join**: [`cross_reference`] fills empty assessment HP fields by exact DN match
//! - **Write**: [`ResultWriter`] writes the header and joined rows
//!
//! # Example
//!
//! ```ignore
//! use analog_xref::{HeaderNames, XrefJob, run};
//!
//! let report = run(&XrefJob {
//!     dump: "dump.csv".into(),
//!     assessment: "assessment.csv".into(),
//!     output: "combined.csv".into(),
//!     dump_columns: HeaderNames::new("DN", "House Pair"),
//!     assessment_columns: HeaderNames::new("Direct Number", "HP"),
//! })?;
//! println!("filled {} rows", report.join.filled);
//! ```

mod error;
pub mod index;
mod job;
pub mod join;
pub mod output;
pub mod table;

// === Error Types ===
pub use error::{ErrorKind, Result, XrefError};

// === Stages ===
pub use index::CrossRefIndex;
pub use join::{JoinOutcome, JoinStats, RowOutcome, cross_reference, fill_row};
pub use output::ResultWriter;
pub use table::{ColumnPair, DataRow, HeaderIndex, TabularReader};

// === Orchestration ===
pub use job::{ASSESSMENT_DATASET, DUMP_DATASET, HeaderNames, XrefJob, XrefReport, run};
