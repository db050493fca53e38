//! Finding catalog tokens in the raw grid, then normalizing them away.
//!
//! Detection runs on the raw cells before normalization. Once exact matches
//! have been replaced by the missing marker, a padded token such as `" NULL "`
//! would be the only trace left of the defect, so both scans must see the
//! original strings.

use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::MissingCatalog;
use crate::column::Column;
use crate::dataset::Dataset;

/// Per-column set of raw values, keyed by column name.
///
/// Columns with nothing to report are absent.
pub type MissingFindings = BTreeMap<String, BTreeSet<String>>;

/// Catalog tokens that appear verbatim in each column.
pub fn locate(dataset: &Dataset, catalog: &MissingCatalog) -> MissingFindings {
    scan(dataset, |cell| catalog.contains(cell))
}

/// Raw values that only match a catalog token after trimming whitespace.
///
/// Exact matches are never reported here. A whitespace-only cell counts when
/// the blank token is in the catalog, since it trims to the empty string.
pub fn locate_padded(dataset: &Dataset, catalog: &MissingCatalog) -> MissingFindings {
    scan(dataset, |cell| is_padded_missing(cell, catalog))
}

/// True for a value that is not itself a catalog token but trims to one.
pub fn is_padded_missing(cell: &str, catalog: &MissingCatalog) -> bool {
    if catalog.contains(cell) {
        return false;
    }
    let trimmed = cell.trim();
    trimmed.len() != cell.len() && catalog.contains(trimmed)
}

fn scan(dataset: &Dataset, matches: impl Fn(&str) -> bool) -> MissingFindings {
    let mut findings = MissingFindings::new();
    for (name, cells) in dataset.columns() {
        let hits: BTreeSet<String> = cells
            .iter()
            .filter(|cell| matches(cell))
            .cloned()
            .collect();
        if !hits.is_empty() {
            findings.insert(name.to_string(), hits);
        }
    }
    findings
}

/// Union of all tokens found anywhere in the dataset.
pub fn found_tokens(findings: &MissingFindings) -> BTreeSet<&str> {
    findings
        .values()
        .flat_map(|tokens| tokens.iter().map(String::as_str))
        .collect()
}

/// Replace exact catalog matches with the missing marker.
///
/// Padded matches are left untouched so they stay visible as present values.
pub fn normalize(dataset: &Dataset, catalog: &MissingCatalog) -> Vec<Column> {
    dataset
        .columns()
        .map(|(name, cells)| {
            let cells = cells
                .iter()
                .map(|cell| (!catalog.contains(cell)).then(|| cell.clone()))
                .collect();
            Column::new(name, cells)
        })
        .collect()
}
