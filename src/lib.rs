//! flenser: column-by-column data-quality triage for CSV files
//!
//! Loads a delimited-text file as raw strings, locates missing-value tokens
//! (including whitespace-padded ones), and runs a fixed registry of
//! heuristics over every column: missingness, uniqueness, row-index shape,
//! format signatures, whitespace and case collisions, value and length
//! frequencies, and numeric summaries.
//!
//! # Quick Start
//!
//! ```no_run
//! use flenser::{DatasetReader, Profiler, ReportFormat, write_report};
//!
//! let dataset = DatasetReader::new().read_path("data.csv").unwrap();
//!
//! let mut profiler = Profiler::new();
//! profiler.extra_missing(["-", "unknown"]).seed(42);
//!
//! let profile = profiler.profile(&dataset);
//! for column in profile.columns.iter().filter_map(|c| c.profile()) {
//!     println!("{}: {:?}", column.name, column.triggered_names().collect::<Vec<_>>());
//! }
//!
//! write_report(&profile, ReportFormat::Html, "report.html").unwrap();
//! ```
//!
//! # Pipeline
//!
//! 1. The catalog merges the standard missing-value tokens with caller tokens.
//! 2. The locator records exact and whitespace-padded catalog matches per
//!    column, then replaces exact matches with the missing marker.
//! 3. Each column is profiled independently (in parallel by default): every
//!    heuristic predicate runs, and triggered ones are rendered.
//! 4. The results are assembled in column order for the report.

mod aggregate;
mod catalog;
mod column;
mod dataset;
mod encoding;
mod error;
pub mod heuristics;
#[cfg(feature = "http")]
pub mod http;
mod locator;
mod profiler;
mod reader;
mod report;

pub use aggregate::{ColumnOutcome, DatasetProfile, Profiler, aggregate};
pub use catalog::{MissingCatalog, STANDARD_MISSING_TOKENS, build_catalog};
pub use column::Column;
pub use dataset::Dataset;
pub use error::{FlenserError, Result};
pub use heuristics::{Heuristic, HeuristicRegistry, Rendering, Table, Thresholds};
pub use locator::{MissingFindings, locate, locate_padded, normalize};
pub use profiler::{ColumnProfile, ColumnProfiler, TriggeredHeuristic};
pub use reader::{DatasetReader, Quote};
pub use report::{ReportFormat, render, write_report};

// Re-export for advanced usage
pub use encoding::{Decoded, SourceEncoding, decode, is_utf8};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api() {
        let _reader = DatasetReader::new();
        let _profiler = Profiler::new();
        let _catalog = MissingCatalog::standard();
        let _registry = HeuristicRegistry::standard();
        let _quote = Quote::Some(b'"');
        let _format = ReportFormat::default();
    }

    #[test]
    fn test_profile_simple_csv() {
        let dataset = DatasetReader::new()
            .read_bytes(b"a,b\n1,x\n2,NULL\n")
            .unwrap();
        let profile = Profiler::new().profile(&dataset);

        assert_eq!(profile.num_rows, 2);
        assert!(profile.column("a").unwrap().is_triggered("unique_id"));
        assert!(profile.column("b").unwrap().is_triggered("has_nan"));
    }
}
