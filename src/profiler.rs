//! Applying the heuristic registry to one column.

use std::any::Any;
use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};

use log::debug;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::column::Column;
use crate::error::{FlenserError, Result};
use crate::heuristics::{Context, HeuristicRegistry, Rendering, Thresholds};

/// A heuristic whose predicate held, with its rendered explanation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggeredHeuristic {
    pub name: &'static str,
    pub rendering: Rendering,
}

/// Everything learned about one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    /// Number of cells that are not missing.
    pub present_count: usize,
    /// Number of distinct present values.
    pub distinct_count: usize,
    /// Triggered heuristics in registry order.
    pub triggered: Vec<TriggeredHeuristic>,
}

impl ColumnProfile {
    /// Names of the triggered heuristics, in registry order.
    pub fn triggered_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.triggered.iter().map(|t| t.name)
    }

    pub fn is_triggered(&self, name: &str) -> bool {
        self.triggered.iter().any(|t| t.name == name)
    }

    /// The rendering for `name`, if it triggered.
    pub fn rendering(&self, name: &str) -> Option<&Rendering> {
        self.triggered
            .iter()
            .find(|t| t.name == name)
            .map(|t| &t.rendering)
    }

    /// Distinct present values as a percentage of present values.
    pub fn distinct_share(&self) -> f64 {
        if self.present_count == 0 {
            0.0
        } else {
            self.distinct_count as f64 * 100.0 / self.present_count as f64
        }
    }
}

/// Runs every registered heuristic against a column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnProfiler<'a> {
    registry: &'a HeuristicRegistry,
    thresholds: Thresholds,
}

impl<'a> ColumnProfiler<'a> {
    pub fn new(registry: &'a HeuristicRegistry, thresholds: Thresholds) -> Self {
        Self {
            registry,
            thresholds,
        }
    }

    /// Profile one normalized column.
    ///
    /// `padded_missing` holds the column's padded-missing findings, if any.
    /// A renderer error, or a panic in a predicate or renderer, is returned as
    /// [`FlenserError::Heuristic`] naming the column and the heuristic.
    pub fn profile(
        &self,
        column: &Column,
        padded_missing: Option<&BTreeSet<String>>,
        rng: &mut StdRng,
    ) -> Result<ColumnProfile> {
        let ctx = Context::new(&self.thresholds, padded_missing);
        let mut triggered = Vec::new();

        for heuristic in self.registry {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                if heuristic.evaluate(column, &ctx) {
                    heuristic.render(column, &ctx, rng).map(Some)
                } else {
                    Ok(None)
                }
            }))
            .unwrap_or_else(|payload| Err(panic_message(payload.as_ref())));

            let rendering = match outcome {
                Ok(Some(rendering)) => rendering,
                Ok(None) => continue,
                Err(message) => {
                    return Err(FlenserError::Heuristic {
                        column: column.name().to_string(),
                        heuristic: heuristic.name(),
                        message,
                    });
                }
            };
            triggered.push(TriggeredHeuristic {
                name: heuristic.name(),
                rendering,
            });
        }

        let profile = ColumnProfile {
            name: column.name().to_string(),
            present_count: column.present_count(),
            distinct_count: column.distinct_present_count(),
            triggered,
        };
        debug!(
            "column {:?}: {:?}",
            profile.name,
            profile.triggered_names().collect::<Vec<_>>()
        );
        Ok(profile)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}
