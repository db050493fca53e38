//! Dataset-level profiling: the `Profiler` builder and its result.

use std::collections::BTreeSet;
use std::path::Path;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

use crate::catalog::MissingCatalog;
use crate::column::Column;
use crate::dataset::Dataset;
use crate::error::{FlenserError, Result};
use crate::heuristics::{HeuristicRegistry, Thresholds};
use crate::locator::{MissingFindings, found_tokens, locate, locate_padded, normalize};
use crate::profiler::{ColumnProfile, ColumnProfiler};
use crate::reader::DatasetReader;

/// Result for one column: a profile, or the heuristic that could not render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ColumnOutcome {
    Profiled(ColumnProfile),
    Failed {
        column: String,
        heuristic: &'static str,
        message: String,
    },
}

impl ColumnOutcome {
    pub fn column_name(&self) -> &str {
        match self {
            ColumnOutcome::Profiled(p) => &p.name,
            ColumnOutcome::Failed { column, .. } => column,
        }
    }

    pub fn profile(&self) -> Option<&ColumnProfile> {
        match self {
            ColumnOutcome::Profiled(p) => Some(p),
            ColumnOutcome::Failed { .. } => None,
        }
    }
}

/// The full profiling result for a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetProfile {
    pub num_rows: usize,
    pub num_columns: usize,
    /// The catalog that was searched for.
    pub catalog: MissingCatalog,
    /// Catalog tokens found verbatim, per column.
    pub missing_found: MissingFindings,
    /// Values matching a catalog token only after trimming, per column.
    pub padded_missing: MissingFindings,
    /// One outcome per column, in dataset column order.
    pub columns: Vec<ColumnOutcome>,
    /// Base seed of the sampling random source, for reproducing the run.
    pub seed: u64,
}

impl DatasetProfile {
    /// All catalog tokens found anywhere in the dataset.
    pub fn found_tokens(&self) -> BTreeSet<&str> {
        found_tokens(&self.missing_found)
    }

    /// The profile of the column called `name`, if it was profiled.
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns
            .iter()
            .filter_map(ColumnOutcome::profile)
            .find(|p| p.name == name)
    }

    /// Columns whose profiling failed.
    pub fn failures(&self) -> impl Iterator<Item = &ColumnOutcome> + '_ {
        self.columns
            .iter()
            .filter(|c| matches!(c, ColumnOutcome::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Profiles datasets column by column.
///
/// # Example
///
/// ```
/// use flenser::{Dataset, Profiler};
///
/// let dataset = Dataset::from_columns(vec![
///     ("id", vec!["1".to_string(), "2".to_string(), "3".to_string()]),
/// ])
/// .unwrap();
///
/// let mut profiler = Profiler::new();
/// profiler.seed(7).extra_missing(["-"]);
///
/// let profile = profiler.profile(&dataset);
/// assert!(profile.column("id").unwrap().is_triggered("unique_id"));
/// ```
#[derive(Debug, Clone)]
pub struct Profiler {
    extra_missing: Vec<String>,
    seed: Option<u64>,
    parallel: bool,
    thresholds: Thresholds,
    registry: HeuristicRegistry,
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Profiler {
    /// Create a profiler with the standard catalog and heuristics.
    pub fn new() -> Self {
        Self {
            extra_missing: Vec::new(),
            seed: None,
            parallel: true,
            thresholds: Thresholds::default(),
            registry: HeuristicRegistry::standard(),
        }
    }

    /// Add tokens to treat as missing on top of the standard list.
    pub fn extra_missing<I, S>(&mut self, tokens: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_missing.extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Fix the seed used by sampling renderers.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    /// Evaluate columns on the rayon pool (default) or one after another.
    pub fn parallel(&mut self, parallel: bool) -> &mut Self {
        self.parallel = parallel;
        self
    }

    /// Set the cardinality and length limits.
    pub fn thresholds(&mut self, thresholds: Thresholds) -> &mut Self {
        self.thresholds = thresholds;
        self
    }

    /// Replace the heuristic registry.
    pub fn registry(&mut self, registry: HeuristicRegistry) -> &mut Self {
        self.registry = registry;
        self
    }

    /// The catalog this profiler searches for.
    pub fn catalog(&self) -> MissingCatalog {
        MissingCatalog::build(&self.extra_missing)
    }

    /// Read a CSV file with default settings and profile it.
    pub fn profile_path<P: AsRef<Path>>(&self, path: P) -> Result<DatasetProfile> {
        let dataset = DatasetReader::new().read_path(path)?;
        Ok(self.profile(&dataset))
    }

    /// Profile a dataset.
    pub fn profile(&self, dataset: &Dataset) -> DatasetProfile {
        self.profile_with_catalog(dataset, self.catalog())
    }

    /// Profile a dataset against an explicit catalog.
    ///
    /// A column whose heuristic fails is recorded as [`ColumnOutcome::Failed`]
    /// and does not affect the other columns.
    pub fn profile_with_catalog(&self, dataset: &Dataset, catalog: MissingCatalog) -> DatasetProfile {
        info!(
            "profiling {} rows x {} columns",
            dataset.num_rows(),
            dataset.num_columns()
        );
        debug!(
            "searching for {} missing-value tokens ({} user-specified)",
            catalog.len(),
            catalog.extra_count()
        );

        let missing_found = locate(dataset, &catalog);
        let padded_missing = locate_padded(dataset, &catalog);
        if !padded_missing.is_empty() {
            debug!("padded missing values: {padded_missing:?}");
        }
        let columns = normalize(dataset, &catalog);

        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        debug!("sampling seed {seed}");

        let profiler = ColumnProfiler::new(&self.registry, self.thresholds);
        let run = |(index, column): (usize, &Column)| -> ColumnOutcome {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(index as u64));
            let padded = padded_missing.get(column.name());
            match profiler.profile(column, padded, &mut rng) {
                Ok(profile) => ColumnOutcome::Profiled(profile),
                Err(FlenserError::Heuristic {
                    column,
                    heuristic,
                    message,
                }) => {
                    warn!("column {column:?}: heuristic '{heuristic}' failed: {message}");
                    ColumnOutcome::Failed {
                        column,
                        heuristic,
                        message,
                    }
                }
                Err(other) => {
                    warn!("column {:?}: {other}", column.name());
                    ColumnOutcome::Failed {
                        column: column.name().to_string(),
                        heuristic: "",
                        message: other.to_string(),
                    }
                }
            }
        };

        let outcomes: Vec<ColumnOutcome> = if self.parallel {
            columns.par_iter().enumerate().map(run).collect()
        } else {
            columns.iter().enumerate().map(run).collect()
        };

        DatasetProfile {
            num_rows: dataset.num_rows(),
            num_columns: dataset.num_columns(),
            catalog,
            missing_found,
            padded_missing,
            columns: outcomes,
            seed,
        }
    }
}

/// Profile `dataset` against `catalog` with default settings.
pub fn aggregate(dataset: &Dataset, catalog: &MissingCatalog) -> DatasetProfile {
    Profiler::new().profile_with_catalog(dataset, catalog.clone())
}
