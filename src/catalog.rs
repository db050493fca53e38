//! The catalog of literal tokens that denote "no value".

use foldhash::{HashSet, HashSetExt};
use serde::Serialize;

/// Tokens treated as missing by default. Matching is exact and case-sensitive.
pub const STANDARD_MISSING_TOKENS: &[&str] = &[
    "",
    "#N/A",
    "#N/A N/A",
    "#NA",
    "-1.#IND",
    "-1.#QNAN",
    "-NaN",
    "-nan",
    "1.#IND",
    "1.#QNAN",
    "<NA>",
    "N/A",
    "NA",
    "NULL",
    "NaN",
    "n/a",
    "nan",
    "null",
];

/// A set of missing-value tokens that remembers insertion order for display.
#[derive(Debug, Clone, Serialize)]
pub struct MissingCatalog {
    tokens: Vec<String>,
    extra_count: usize,
    #[serde(skip)]
    lookup: HashSet<String>,
}

impl PartialEq for MissingCatalog {
    fn eq(&self, other: &Self) -> bool {
        self.lookup == other.lookup
    }
}

impl Eq for MissingCatalog {}

impl Default for MissingCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl MissingCatalog {
    /// The standard tokens only.
    pub fn standard() -> Self {
        let mut catalog = Self {
            tokens: Vec::with_capacity(STANDARD_MISSING_TOKENS.len()),
            extra_count: 0,
            lookup: HashSet::with_capacity(STANDARD_MISSING_TOKENS.len()),
        };
        for token in STANDARD_MISSING_TOKENS {
            catalog.insert(token);
        }
        catalog
    }

    /// The standard tokens followed by `extra`. Duplicates collapse.
    pub fn build<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Self::standard();
        for token in extra {
            if catalog.insert(token.as_ref()) {
                catalog.extra_count += 1;
            }
        }
        catalog
    }

    fn insert(&mut self, token: &str) -> bool {
        if self.lookup.insert(token.to_string()) {
            self.tokens.push(token.to_string());
            true
        } else {
            false
        }
    }

    /// Exact, case-sensitive membership.
    #[inline]
    pub fn contains(&self, value: &str) -> bool {
        self.lookup.contains(value)
    }

    /// Whether the blank token is part of the catalog.
    #[inline]
    pub fn contains_blank(&self) -> bool {
        self.contains("")
    }

    /// Tokens in display order: standard first, then caller-supplied.
    pub fn tokens(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.tokens.iter().map(String::as_str)
    }

    /// Number of tokens that came from the caller rather than the standard list.
    #[inline]
    pub fn extra_count(&self) -> usize {
        self.extra_count
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Merge the standard list with caller-supplied tokens.
pub fn build_catalog<S: AsRef<str>>(extra: &[S]) -> MissingCatalog {
    MissingCatalog::build(extra)
}
