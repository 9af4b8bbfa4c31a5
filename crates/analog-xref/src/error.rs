//! Error types for the dump/assessment cross-reference.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading, joining, or writing datasets.
#[derive(Debug, Error)]
pub enum XrefError {
    // === I/O Errors ===
    /// Failed to open, read, or write a file.
    #[error("I/O failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Data Errors ===
    /// A data row could not be decoded or is too short for a resolved column.
    #[error("malformed row in {dataset} file at line {line}: {reason}")]
    MalformedRow {
        dataset: String,
        line: u64,
        reason: String,
    },

    /// A required header name is absent from the header row.
    #[error("could not find header name {name} in {dataset} file")]
    HeaderNotFound { name: String, dataset: String },

    /// The dataset has no header row at all.
    #[error("{dataset} file is empty: no header row")]
    EmptyDataset { dataset: String },
}

/// Coarse classification of [`XrefError`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    IoFailure,
    MalformedRow,
    HeaderNotFound,
}

impl XrefError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(dataset: &str, line: u64, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            dataset: dataset.to_string(),
            line,
            reason: reason.into(),
        }
    }

    /// Returns the error category.
    ///
    /// An empty dataset is reported as a missing header, since no required
    /// header name can resolve against it.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } => ErrorKind::IoFailure,
            Self::MalformedRow { .. } => ErrorKind::MalformedRow,
            Self::HeaderNotFound { .. } | Self::EmptyDataset { .. } => ErrorKind::HeaderNotFound,
        }
    }
}

/// Result type for cross-reference operations.
pub type Result<T> = std::result::Result<T, XrefError>;
