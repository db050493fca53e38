//! A normalized column: present values and missing markers.

use foldhash::{HashMap, HashMapExt, HashSet, HashSetExt};

/// One column after missing-value normalization.
///
/// `None` is the canonical missing marker. It is distinct from every string,
/// including the empty string, which can survive normalization only when the
/// caller's catalog does not list it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    cells: Vec<Option<String>>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All cells, missing markers included, in row order.
    #[inline]
    pub fn cells(&self) -> &[Option<String>] {
        &self.cells
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Present values in row order.
    pub fn present(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.cells.iter().filter_map(Option::as_deref)
    }

    pub fn present_count(&self) -> usize {
        self.present().count()
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    #[inline]
    pub fn has_missing(&self) -> bool {
        self.cells.iter().any(Option::is_none)
    }

    /// True when there is at least one row and every row is missing.
    #[inline]
    pub fn all_missing(&self) -> bool {
        !self.cells.is_empty() && self.cells.iter().all(Option::is_none)
    }

    /// Distinct present values in order of first appearance.
    pub fn distinct_present(&self) -> Vec<&str> {
        let mut seen = HashSet::with_capacity(self.cells.len());
        self.present().filter(|v| seen.insert(*v)).collect()
    }

    pub fn distinct_present_count(&self) -> usize {
        self.present().collect::<HashSet<_>>().len()
    }

    /// Occurrences of each cell value, missing marker counted as its own value.
    pub fn cell_counts(&self) -> HashMap<Option<&str>, usize> {
        let mut counts = HashMap::with_capacity(self.cells.len());
        for cell in &self.cells {
            *counts.entry(cell.as_deref()).or_insert(0) += 1;
        }
        counts
    }

    /// `(value, occurrences)` for present values, in order of first appearance.
    pub fn present_counts(&self) -> Vec<(&str, usize)> {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(self.cells.len());
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for value in self.present() {
            match index.get(value) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(value, counts.len());
                    counts.push((value, 1));
                }
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(cells: &[Option<&str>]) -> Column {
        Column::new("c", cells.iter().map(|c| c.map(str::to_string)).collect())
    }

    #[test]
    fn test_present_excludes_missing() {
        let col = column(&[Some("a"), None, Some("b"), Some("a")]);
        assert_eq!(col.present().collect::<Vec<_>>(), vec!["a", "b", "a"]);
        assert_eq!(col.present_count(), 3);
        assert_eq!(col.missing_count(), 1);
        assert_eq!(col.distinct_present(), vec!["a", "b"]);
        assert_eq!(col.distinct_present_count(), 2);
    }

    #[test]
    fn test_cell_counts_include_missing() {
        let col = column(&[None, None, Some("x")]);
        let counts = col.cell_counts();
        assert_eq!(counts[&None::<&str>], 2);
        assert_eq!(counts[&Some("x")], 1);
    }

    #[test]
    fn test_all_missing_needs_rows() {
        assert!(!column(&[]).all_missing());
        assert!(column(&[None]).all_missing());
        assert!(!column(&[None, Some("")]).all_missing());
    }

    #[test]
    fn test_present_counts_first_appearance() {
        let col = column(&[Some("b"), Some("a"), Some("b"), None]);
        assert_eq!(col.present_counts(), vec![("b", 2), ("a", 1)]);
    }
}
