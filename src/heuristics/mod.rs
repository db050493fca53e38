//! Named column heuristics and the registry that orders them.
//!
//! A heuristic is a flat record of a name, a predicate and a renderer. The
//! predicate decides whether the heuristic applies to a column; the renderer
//! explains it and is only called when the predicate held. Every heuristic is
//! evaluated independently, and registry order only fixes display order.

mod checks;
pub mod patterns;
pub mod render;

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use serde::Serialize;

use crate::column::Column;

pub use render::{Rendering, Table};

/// Limits used by the cardinality and length heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Thresholds {
    /// Largest distinct count that still gets a value-frequency table.
    pub unique_max: usize,
    /// Exclusive upper bound on distinct value lengths for `common_lengths`.
    pub max_common_lengths: usize,
    /// Number of example values shown by sampling renderers.
    pub sample_size: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            unique_max: 25,
            max_common_lengths: 5,
            sample_size: 3,
        }
    }
}

/// Read-only inputs a heuristic may need besides the column itself.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub thresholds: &'a Thresholds,
    /// Raw values in this column that matched a catalog token only after trimming.
    pub padded_missing: Option<&'a BTreeSet<String>>,
}

impl<'a> Context<'a> {
    pub fn new(thresholds: &'a Thresholds, padded_missing: Option<&'a BTreeSet<String>>) -> Self {
        Self {
            thresholds,
            padded_missing,
        }
    }
}

/// Decides whether a heuristic applies to a column.
pub type Predicate = fn(&Column, &Context<'_>) -> bool;

/// Explains a triggered heuristic. An `Err` carries the reason rendering failed.
pub type Renderer = fn(&Column, &Context<'_>, &mut StdRng) -> Result<Rendering, String>;

/// A named predicate/renderer pair.
#[derive(Clone, Copy)]
pub struct Heuristic {
    name: &'static str,
    predicate: Predicate,
    renderer: Renderer,
}

impl std::fmt::Debug for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Heuristic").field("name", &self.name).finish()
    }
}

impl Heuristic {
    pub const fn new(name: &'static str, predicate: Predicate, renderer: Renderer) -> Self {
        Self {
            name,
            predicate,
            renderer,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the predicate.
    #[inline]
    pub fn evaluate(&self, column: &Column, ctx: &Context<'_>) -> bool {
        (self.predicate)(column, ctx)
    }

    /// Run the renderer. Callers only do this after `evaluate` returned true.
    #[inline]
    pub fn render(
        &self,
        column: &Column,
        ctx: &Context<'_>,
        rng: &mut StdRng,
    ) -> Result<Rendering, String> {
        (self.renderer)(column, ctx, rng)
    }
}

/// An ordered, immutable list of heuristics.
#[derive(Debug, Clone)]
pub struct HeuristicRegistry {
    heuristics: Vec<Heuristic>,
}

impl Default for HeuristicRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl HeuristicRegistry {
    /// The built-in heuristics in display order.
    pub fn standard() -> Self {
        Self {
            heuristics: checks::standard_heuristics(),
        }
    }

    /// A registry holding exactly `heuristics`, in the given order.
    pub fn from_heuristics(heuristics: Vec<Heuristic>) -> Self {
        Self { heuristics }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Heuristic> {
        self.heuristics.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.heuristics.iter().map(Heuristic::name)
    }

    pub fn get(&self, name: &str) -> Option<&Heuristic> {
        self.heuristics.iter().find(|h| h.name == name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heuristics.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heuristics.is_empty()
    }
}

impl<'a> IntoIterator for &'a HeuristicRegistry {
    type Item = &'a Heuristic;
    type IntoIter = std::slice::Iter<'a, Heuristic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foldhash::HashSet;

    #[test]
    fn test_standard_order() {
        let names: Vec<&str> = HeuristicRegistry::standard().names().collect();
        assert_eq!(
            names,
            vec![
                "all_nan",
                "not_all_nan",
                "has_nan",
                "no_nan",
                "all_cells_same_value",
                "all_unique",
                "unique_id",
                "row_index_0",
                "row_index_1",
                "strip_and_casefold_collapse",
                "salesforceid_15",
                "salesforceid_18",
                "numeric_only",
                "numeric_only_unique_over_max",
                "alpha_only",
                "matches_nan_with_spaces",
                "leading_trailing_spaces",
                "boolean_like",
                "leading_zeros",
                "common_lengths",
                "unique_under_max",
                "contains_numeric",
            ]
        );
    }

    #[test]
    fn test_names_are_unique() {
        let registry = HeuristicRegistry::standard();
        let unique: HashSet<&str> = registry.names().collect();
        assert_eq!(unique.len(), registry.len());
    }

    #[test]
    fn test_custom_registry() {
        let always = Heuristic::new("always", |_, _| true, |_, _, _| Ok(Rendering::text("yes")));
        let registry = HeuristicRegistry::from_heuristics(vec![always]);
        assert_eq!(registry.len(), 1);
        assert!(registry.get("always").is_some());
        assert!(registry.get("all_nan").is_none());
    }
}
