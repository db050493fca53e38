//! The in-memory raw grid: named columns of unparsed string cells.

use foldhash::{HashSet, HashSetExt};

use crate::error::{FlenserError, Result};

/// A fully materialized table of raw string cells.
///
/// Cells are stored column-major, since every consumer downstream works one
/// column at a time. No missing-value interpretation happens here: a blank
/// cell is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    names: Vec<String>,
    columns: Vec<Vec<String>>,
    num_rows: usize,
}

impl Dataset {
    /// Build a dataset from column names and row-major records.
    ///
    /// Every row must have exactly one cell per column and names must be unique.
    pub fn new<S: Into<String>>(names: Vec<S>, rows: Vec<Vec<String>>) -> Result<Self> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(FlenserError::DuplicateColumn(name.clone()));
            }
        }

        let mut columns: Vec<Vec<String>> = vec![Vec::with_capacity(rows.len()); names.len()];
        let num_rows = rows.len();
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != names.len() {
                return Err(FlenserError::RaggedRow {
                    row: i + 1,
                    expected: names.len(),
                    found: row.len(),
                });
            }
            for (column, cell) in columns.iter_mut().zip(row) {
                column.push(cell);
            }
        }

        Ok(Self {
            names,
            columns,
            num_rows,
        })
    }

    /// Build a dataset directly from `(name, cells)` pairs.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<String>)>) -> Result<Self> {
        let num_rows = columns.first().map_or(0, |(_, cells)| cells.len());
        let mut names = Vec::with_capacity(columns.len());
        let mut cells = Vec::with_capacity(columns.len());
        let mut seen = HashSet::with_capacity(columns.len());

        for (name, column) in columns {
            let name = name.into();
            if column.len() != num_rows {
                return Err(FlenserError::InvalidConfig(format!(
                    "column {name:?} has {} cells, expected {num_rows}",
                    column.len()
                )));
            }
            if !seen.insert(name.clone()) {
                return Err(FlenserError::DuplicateColumn(name));
            }
            names.push(name);
            cells.push(column);
        }

        Ok(Self {
            names,
            columns: cells,
            num_rows,
        })
    }

    /// Column names in dataset order.
    #[inline]
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    #[inline]
    pub fn num_columns(&self) -> usize {
        self.names.len()
    }

    /// Returns true if there are no rows or no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_rows == 0 || self.names.is_empty()
    }

    /// Raw cells of the column at `index`.
    #[inline]
    pub fn column(&self, index: usize) -> Option<&[String]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// Raw cells of the column called `name`.
    pub fn column_by_name(&self, name: &str) -> Option<&[String]> {
        let index = self.names.iter().position(|n| n == name)?;
        self.column(index)
    }

    /// Iterate `(name, raw cells)` in dataset order.
    pub fn columns(&self) -> impl ExactSizeIterator<Item = (&str, &[String])> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_rows_become_columns() {
        let ds = Dataset::new(vec!["a", "b"], vec![row(&["1", "x"]), row(&["2", "y"])]).unwrap();

        assert_eq!(ds.num_rows(), 2);
        assert_eq!(ds.num_columns(), 2);
        assert_eq!(ds.column(0).unwrap(), &["1", "2"]);
        assert_eq!(ds.column_by_name("b").unwrap(), &["x", "y"]);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = Dataset::new(vec!["a", "a"], vec![]).unwrap_err();
        assert!(matches!(err, FlenserError::DuplicateColumn(name) if name == "a"));
    }

    #[test]
    fn test_ragged_row_rejected() {
        let err = Dataset::new(vec!["a", "b"], vec![row(&["1"])]).unwrap_err();
        assert!(matches!(
            err,
            FlenserError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_header_only_is_empty_but_valid() {
        let ds = Dataset::new(vec!["a"], vec![]).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.num_columns(), 1);
        assert_eq!(ds.column(0).unwrap().len(), 0);
    }

    #[test]
    fn test_from_columns_checks_lengths() {
        let result = Dataset::from_columns(vec![("a", row(&["1", "2"])), ("b", row(&["1"]))]);
        assert!(matches!(result, Err(FlenserError::InvalidConfig(_))));
    }
}
