//! Fills the assessment house-pair column from the dump index.

use crate::error::{Result, XrefError};
use crate::index::CrossRefIndex;
use crate::table::{ColumnPair, DataRow};

/// What happened to a single assessment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// The house-pair field already had a value and was left alone.
    AlreadyPopulated,
    /// The house-pair field was filled from the index.
    Filled,
    /// The direct number had no (non-empty) entry in the index.
    Unmatched,
}

/// Per-run join counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinStats {
    pub rows: usize,
    pub already_populated: usize,
    pub filled: usize,
    pub unmatched: usize,
}

impl JoinStats {
    fn record(&mut self, outcome: RowOutcome) {
        self.rows += 1;
        match outcome {
            RowOutcome::AlreadyPopulated => self.already_populated += 1,
            RowOutcome::Filled => self.filled += 1,
            RowOutcome::Unmatched => self.unmatched += 1,
        }
    }
}

/// Joined assessment rows in their original order.
#[derive(Debug, Clone, Default)]
pub struct JoinOutcome {
    pub rows: Vec<Vec<String>>,
    pub stats: JoinStats,
}

/// Applies the cross-reference rule to one row.
///
/// Returns `None` if the row is too short for either resolved column.
pub fn fill_row(
    row: &mut [String],
    columns: ColumnPair,
    index: &CrossRefIndex,
) -> Option<RowOutcome> {
    if row.len() < columns.min_width() {
        return None;
    }
    if !row[columns.hp].is_empty() {
        return Some(RowOutcome::AlreadyPopulated);
    }
    match index.get(&row[columns.dn]) {
        Some(value) if !value.is_empty() => {
            row[columns.hp] = value.to_string();
            Some(RowOutcome::Filled)
        }
        _ => Some(RowOutcome::Unmatched),
    }
}

/// Cross-references every assessment row against `index`.
pub fn cross_reference<I>(
    rows: I,
    columns: ColumnPair,
    index: &CrossRefIndex,
    dataset: &str,
) -> Result<JoinOutcome>
where
    I: IntoIterator<Item = Result<DataRow>>,
{
    let mut outcome = JoinOutcome::default();
    for row in rows {
        let DataRow { line, mut fields } = row?;
        let Some(result) = fill_row(&mut fields, columns, index) else {
            return Err(XrefError::malformed(
                dataset,
                line,
                format!(
                    "expected at least {} fields, found {}",
                    columns.min_width(),
                    fields.len()
                ),
            ));
        };
        if result == RowOutcome::Filled {
            tracing::trace!(
                dataset,
                line,
                dn = %fields[columns.dn],
                hp = %fields[columns.hp],
                "filled house pair"
            );
        }
        outcome.stats.record(result);
        outcome.rows.push(fields);
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| (*s).to_string()).collect()
    }

    fn index(pairs: &[(&str, &str)]) -> CrossRefIndex {
        let mut index = CrossRefIndex::default();
        for (k, v) in pairs {
            index.insert((*k).to_string(), (*v).to_string());
        }
        index
    }

    fn data(rows: &[&[&str]]) -> Vec<Result<DataRow>> {
        rows.iter()
            .enumerate()
            .map(|(i, fields)| {
                Ok(DataRow {
                    line: i as u64 + 2,
                    fields: strings(fields),
                })
            })
            .collect()
    }

    const COLUMNS: ColumnPair = ColumnPair { dn: 0, hp: 1 };

    #[test]
    fn test_fills_matched_and_leaves_unmatched() {
        let index = index(&[("555-1234", "A1"), ("555-5678", "B2")]);
        let rows = data(&[&["555-1234", ""], &["555-9999", ""]]);
        let outcome = cross_reference(rows, COLUMNS, &index, "assessment").unwrap();
        assert_eq!(
            outcome.rows,
            vec![strings(&["555-1234", "A1"]), strings(&["555-9999", ""])]
        );
        assert_eq!(
            outcome.stats,
            JoinStats {
                rows: 2,
                already_populated: 0,
                filled: 1,
                unmatched: 1,
            }
        );
    }

    #[test]
    fn test_prefilled_is_unchanged() {
        let index = index(&[("555-1234", "A1")]);
        let mut row = strings(&["555-1234", "Z9"]);
        assert_eq!(
            fill_row(&mut row, COLUMNS, &index),
            Some(RowOutcome::AlreadyPopulated)
        );
        assert_eq!(row, strings(&["555-1234", "Z9"]));
    }

    #[test]
    fn test_exact_match_only() {
        let index = index(&[("555-12345", "A1"), ("55-1234", "B2")]);
        let mut row = strings(&["555-1234", ""]);
        assert_eq!(
            fill_row(&mut row, COLUMNS, &index),
            Some(RowOutcome::Unmatched)
        );
        assert_eq!(row[1], "");
    }

    #[test]
    fn test_empty_indexed_value_counts_as_unmatched() {
        let index = index(&[("555-1234", "")]);
        let mut row = strings(&["555-1234", ""]);
        assert_eq!(
            fill_row(&mut row, COLUMNS, &index),
            Some(RowOutcome::Unmatched)
        );
    }

    #[test]
    fn test_preserves_order_and_other_columns() {
        let index = index(&[("b", "HP-B"), ("a", "HP-A")]);
        let columns = ColumnPair { dn: 2, hp: 0 };
        let rows = data(&[&["", "x", "a"], &["", "y", "b"], &["keep", "z", "a"]]);
        let outcome = cross_reference(rows, columns, &index, "assessment").unwrap();
        assert_eq!(
            outcome.rows,
            vec![
                strings(&["HP-A", "x", "a"]),
                strings(&["HP-B", "y", "b"]),
                strings(&["keep", "z", "a"]),
            ]
        );
    }

    #[test]
    fn test_short_row_is_malformed() {
        let index = index(&[]);
        let rows = data(&[&["555-1234", ""], &["555-5678"]]);
        let err = cross_reference(rows, COLUMNS, &index, "assessment").unwrap_err();
        assert!(matches!(err, XrefError::MalformedRow { line: 3, .. }));
    }
}
