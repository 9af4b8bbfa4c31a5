//! Writes the joined assessment back out as CSV.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;

use crate::error::{Result, XrefError};

/// CSV writer for the joined result. The header row is always written first.
pub struct ResultWriter<W: Write> {
    inner: csv::Writer<W>,
    destination: PathBuf,
}

impl ResultWriter<File> {
    /// Creates (or truncates) `path`, creating missing parent directories.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| XrefError::io(parent, e))?;
        }
        let file = File::create(path).map_err(|e| XrefError::io(path, e))?;
        Ok(Self::with_destination(file, path.to_path_buf()))
    }
}

impl<W: Write> ResultWriter<W> {
    pub fn from_writer(writer: W) -> Self {
        Self::with_destination(writer, PathBuf::from("<output>"))
    }

    fn with_destination(writer: W, destination: PathBuf) -> Self {
        let inner = WriterBuilder::new().flexible(true).from_writer(writer);
        Self { inner, destination }
    }

    /// Writes `header` followed by `rows` and flushes.
    pub fn write_joined(mut self, header: &[String], rows: &[Vec<String>]) -> Result<W> {
        self.write_record(header)?;
        for row in rows {
            self.write_record(row)?;
        }
        self.inner
            .flush()
            .map_err(|e| XrefError::io(&self.destination, e))?;
        let destination = self.destination;
        self.inner
            .into_inner()
            .map_err(|e| XrefError::io(destination, e.into_error()))
    }

    fn write_record(&mut self, record: &[String]) -> Result<()> {
        self.inner.write_record(record).map_err(|e| {
            let source = match e.into_kind() {
                csv::ErrorKind::Io(source) => source,
                other => std::io::Error::other(format!("{other:?}")),
            };
            XrefError::io(&self.destination, source)
        })
    }
}
