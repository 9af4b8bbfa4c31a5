//! Case-insensitive header lookup.

use std::collections::HashMap;

use crate::error::{Result, XrefError};

/// Resolved positions of the direct-number and house-pair columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPair {
    /// Direct-number (join key) column.
    pub dn: usize,
    /// House-pair (value) column.
    pub hp: usize,
}

impl ColumnPair {
    /// Minimum number of fields a row needs to carry both columns.
    pub fn min_width(self) -> usize {
        self.dn.max(self.hp) + 1
    }
}

/// Lower-cased header name to column position, built once per dataset.
#[derive(Debug, Clone)]
pub struct HeaderIndex {
    dataset: String,
    positions: HashMap<String, usize>,
    width: usize,
}

impl HeaderIndex {
    /// Builds the index from a header row. Duplicate names keep their first position.
    pub fn new(headers: &[String], dataset: &str) -> Self {
        let mut positions = HashMap::with_capacity(headers.len());
        for (idx, name) in headers.iter().enumerate() {
            positions.entry(name.to_lowercase()).or_insert(idx);
        }
        Self {
            dataset: dataset.to_string(),
            positions,
            width: headers.len(),
        }
    }

    /// Number of columns in the header row.
    pub fn len(&self) -> usize {
        self.width
    }

    /// Returns true if the header row has no columns.
    pub fn is_empty(&self) -> bool {
        self.width == 0
    }

    /// Returns the zero-based position of `name`, compared case-insensitively.
    pub fn resolve(&self, name: &str) -> Result<usize> {
        self.positions
            .get(&name.to_lowercase())
            .copied()
            .ok_or_else(|| XrefError::HeaderNotFound {
                name: name.to_string(),
                dataset: self.dataset.clone(),
            })
    }

    /// Resolves both join columns, direct number first.
    pub fn resolve_pair(&self, dn: &str, hp: &str) -> Result<ColumnPair> {
        let dn = self.resolve(dn)?;
        let hp = self.resolve(hp)?;
        Ok(ColumnPair { dn, hp })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let index = HeaderIndex::new(&headers(&["DN", "House Pair"]), "dump");
        assert_eq!(index.resolve("dn").unwrap(), 0);
        assert_eq!(index.resolve("HOUSE PAIR").unwrap(), 1);
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let index = HeaderIndex::new(&headers(&["Site", "dn", "DN", "hp"]), "assessment");
        assert_eq!(index.resolve("Dn").unwrap(), 1);
    }

    #[test]
    fn test_resolve_missing_names_dataset() {
        let index = HeaderIndex::new(&headers(&["dn"]), "assessment");
        let err = index.resolve("hp").unwrap_err();
        match err {
            XrefError::HeaderNotFound { name, dataset } => {
                assert_eq!(name, "hp");
                assert_eq!(dataset, "assessment");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_pair_checks_dn_first() {
        let index = HeaderIndex::new(&headers(&["other"]), "dump");
        let err = index.resolve_pair("dn", "hp").unwrap_err();
        assert!(matches!(err, XrefError::HeaderNotFound { ref name, .. } if name == "dn"));
    }

    #[test]
    fn test_column_pair_min_width() {
        let pair = ColumnPair { dn: 4, hp: 1 };
        assert_eq!(pair.min_width(), 5);
    }

    #[test]
    fn test_len() {
        let index = HeaderIndex::new(&headers(&["a", "b", "c"]), "dump");
        assert_eq!(index.len(), 3);
        assert!(!index.is_empty());
    }
}
