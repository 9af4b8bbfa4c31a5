//! Direct-number to house-pair index built from the dump dataset.

use std::collections::HashMap;

use crate::error::{Result, XrefError};
use crate::table::{ColumnPair, DataRow};

/// Mapping from a key field value to its paired value field.
///
/// Later rows overwrite earlier rows sharing a key.
#[derive(Debug, Clone, Default)]
pub struct CrossRefIndex {
    entries: HashMap<String, String>,
    overwritten: usize,
}

impl CrossRefIndex {
    /// Builds the index from data rows, keyed on `columns.dn` with values from `columns.hp`.
    ///
    /// A row too short to carry both columns is a [`XrefError::MalformedRow`].
    pub fn build<I>(rows: I, columns: ColumnPair, dataset: &str) -> Result<Self>
    where
        I: IntoIterator<Item = Result<DataRow>>,
    {
        let mut index = Self::default();
        for row in rows {
            let row = row?;
            let (key, value) = key_value(&row, columns, dataset)?;
            index.insert(key.to_string(), value.to_string());
        }
        Ok(index)
    }

    /// Inserts or overwrites an entry, returning the previous value.
    pub fn insert(&mut self, key: String, value: String) -> Option<String> {
        let previous = self.entries.insert(key, value);
        if previous.is_some() {
            self.overwritten += 1;
        }
        previous
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of inserts that replaced an existing key.
    pub fn overwritten(&self) -> usize {
        self.overwritten
    }
}

fn key_value<'a>(
    row: &'a DataRow,
    columns: ColumnPair,
    dataset: &str,
) -> Result<(&'a str, &'a str)> {
    match (row.fields.get(columns.dn), row.fields.get(columns.hp)) {
        (Some(key), Some(value)) => {
            tracing::trace!(dataset, line = row.line, dn = %key, hp = %value, "indexed row");
            Ok((key.as_str(), value.as_str()))
        }
        _ => Err(XrefError::malformed(
            dataset,
            row.line,
            format!(
                "expected at least {} fields, found {}",
                columns.min_width(),
                row.fields.len()
            ),
        )),
    }
}
