//! Tabular (CSV) reading: rows and header lookup.

mod header;
mod reader;

pub use header::{ColumnPair, HeaderIndex};
pub use reader::{DataRow, Rows, TabularReader};
