//! Row-at-a-time CSV reading with the first row as header.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};

use crate::error::{Result, XrefError};

/// A data row together with its 1-based line in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRow {
    pub line: u64,
    pub fields: Vec<String>,
}

/// Reads a delimited text stream whose first record is the header row.
///
/// Field counts are not enforced here; downstream stages check each row
/// against the columns they actually resolve.
pub struct TabularReader<R> {
    inner: csv::Reader<R>,
    dataset: String,
    source: PathBuf,
    header: Option<Vec<String>>,
}

impl TabularReader<File> {
    /// Opens `path` for reading. `dataset` labels the file in errors and logs.
    pub fn open(path: &Path, dataset: &str) -> Result<Self> {
        let file = File::open(path).map_err(|e| XrefError::io(path, e))?;
        Ok(Self::with_source(file, dataset, path.to_path_buf()))
    }
}

impl<R: Read> TabularReader<R> {
    /// Wraps an arbitrary byte stream.
    pub fn from_reader(reader: R, dataset: &str) -> Self {
        Self::with_source(reader, dataset, PathBuf::from(format!("<{dataset}>")))
    }

    fn with_source(reader: R, dataset: &str, source: PathBuf) -> Self {
        let inner = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        Self {
            inner,
            dataset: dataset.to_string(),
            source,
            header: None,
        }
    }

    /// Returns the header row, reading it on first call.
    pub fn header(&mut self) -> Result<&[String]> {
        if self.header.is_none() {
            let mut record = StringRecord::new();
            let found = self
                .inner
                .read_record(&mut record)
                .map_err(|e| self.map_csv_error(e))?;
            if !found {
                return Err(XrefError::EmptyDataset {
                    dataset: self.dataset.clone(),
                });
            }
            let mut fields = record_fields(&record);
            if let Some(first) = fields.first_mut()
                && let Some(stripped) = first.strip_prefix('\u{feff}')
            {
                *first = stripped.to_string();
            }
            tracing::debug!(
                dataset = %self.dataset,
                columns = fields.len(),
                "read header row"
            );
            self.header = Some(fields);
        }
        Ok(self.header.as_deref().unwrap_or_default())
    }

    /// Returns a lazy iterator over the data rows, consuming the stream.
    ///
    /// The header row is read first if it has not been read yet.
    pub fn rows(&mut self) -> Result<Rows<'_, R>> {
        self.header()?;
        Ok(Rows {
            reader: self,
            record: StringRecord::new(),
            done: false,
        })
    }

    fn map_csv_error(&self, err: csv::Error) -> XrefError {
        let line = err
            .position()
            .map_or_else(|| self.inner.position().line(), csv::Position::line);
        match err.into_kind() {
            csv::ErrorKind::Io(source) => XrefError::io(&self.source, source),
            csv::ErrorKind::Utf8 { err, .. } => {
                XrefError::malformed(&self.dataset, line, format!("invalid UTF-8: {err}"))
            }
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => XrefError::malformed(
                &self.dataset,
                line,
                format!("expected {expected_len} fields, found {len}"),
            ),
            other => XrefError::malformed(&self.dataset, line, format!("{other:?}")),
        }
    }
}

/// Iterator over data rows. Ends at end-of-stream or after the first error.
pub struct Rows<'r, R> {
    reader: &'r mut TabularReader<R>,
    record: StringRecord,
    done: bool,
}

impl<R: Read> Iterator for Rows<'_, R> {
    type Item = Result<DataRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.inner.read_record(&mut self.record) {
            Ok(true) => {
                let line = self
                    .record
                    .position()
                    .map_or_else(|| self.reader.inner.position().line(), csv::Position::line);
                Some(Ok(DataRow {
                    line,
                    fields: record_fields(&self.record),
                }))
            }
            Ok(false) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(self.reader.map_csv_error(err)))
            }
        }
    }
}

fn record_fields(record: &StringRecord) -> Vec<String> {
    record.iter().map(str::to_string).collect()
}
