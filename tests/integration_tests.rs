//! Integration tests for flenser

use flenser::{
    ColumnOutcome, Dataset, DatasetReader, MissingCatalog, Profiler, ReportFormat, build_catalog,
    locate, locate_padded, normalize, write_report,
};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::io::Write;
use tempfile::NamedTempFile;

fn strings(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|s| (*s).to_string()).collect()
}

fn seeded() -> Profiler {
    let mut profiler = Profiler::new();
    profiler.seed(1234);
    profiler
}

fn triggered(profile: &flenser::DatasetProfile, column: &str) -> BTreeSet<&'static str> {
    profile
        .column(column)
        .unwrap_or_else(|| panic!("column {column} missing"))
        .triggered_names()
        .collect()
}

#[test]
fn test_reference_dataset() {
    let data = b"id,flag,note\n1,Y,\n2,Y,\n3,N,x\n";
    let dataset = DatasetReader::new().read_bytes(data).unwrap();
    let profile = seeded().profile(&dataset);

    let id = triggered(&profile, "id");
    for name in ["unique_id", "row_index_1", "numeric_only", "all_unique"] {
        assert!(id.contains(name), "id should trigger {name}: {id:?}");
    }
    assert!(!id.contains("row_index_0"));

    let flag = triggered(&profile, "flag");
    assert!(flag.contains("boolean_like"));
    assert!(flag.contains("no_nan"));
    assert!(!flag.contains("all_unique"));

    let note = triggered(&profile, "note");
    assert!(note.contains("has_nan"));
    assert!(note.contains("not_all_nan"));
    assert!(!note.contains("all_nan"));
    assert!(profile.missing_found["note"].contains(""));
    assert!(!profile.missing_found.contains_key("id"));
}

#[test]
fn test_triggered_in_registry_order() {
    let dataset = DatasetReader::new()
        .read_bytes(b"id\n1\n2\n3\n")
        .unwrap();
    let profile = seeded().profile(&dataset);
    let names: Vec<&str> = profile.column("id").unwrap().triggered_names().collect();

    let registry = flenser::HeuristicRegistry::standard();
    let expected: Vec<&str> = registry.names().filter(|n| names.contains(n)).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_exact_vs_padded_null() {
    let dataset = Dataset::from_columns(vec![
        ("exact", strings(&["NULL", "a", "b"])),
        ("padded", strings(&[" NULL ", "a", "b"])),
    ])
    .unwrap();
    let profile = seeded().profile(&dataset);

    let exact = profile.column("exact").unwrap();
    assert!(exact.is_triggered("has_nan"));
    assert!(!exact.is_triggered("matches_nan_with_spaces"));
    assert_eq!(exact.present_count, 2);

    let padded = profile.column("padded").unwrap();
    assert!(padded.is_triggered("matches_nan_with_spaces"));
    assert!(padded.is_triggered("no_nan"));
    assert!(padded.is_triggered("leading_trailing_spaces"));
    assert_eq!(padded.present_count, 3);
    assert!(!profile.padded_missing.contains_key("exact"));
}

#[test]
fn test_salesforce_signature() {
    let dataset = Dataset::from_columns(vec![
        ("mixed", strings(&["a1b2c3d4e5f6g7h"])),
        ("digits", strings(&["111111111111111"])),
    ])
    .unwrap();
    let profile = seeded().profile(&dataset);

    assert!(profile.column("mixed").unwrap().is_triggered("salesforceid_15"));
    assert!(!profile.column("digits").unwrap().is_triggered("salesforceid_15"));
}

#[test]
fn test_rerun_is_stable() {
    let data = b"a,b,c\n x,1,\nX,2,NA\ny,03,z\nY,4,z\n";
    let dataset = DatasetReader::new().read_bytes(data).unwrap();

    // Unseeded: triggered sets must agree even if sampled text differs.
    let first = Profiler::new().profile(&dataset);
    let second = Profiler::new().profile(&dataset);
    for (a, b) in first.columns.iter().zip(&second.columns) {
        let a: Vec<_> = a.profile().unwrap().triggered_names().collect();
        let b: Vec<_> = b.profile().unwrap().triggered_names().collect();
        assert_eq!(a, b);
    }

    // Seeded: everything matches, sampled text included.
    assert_eq!(seeded().profile(&dataset), seeded().profile(&dataset));
}

#[test]
fn test_empty_and_header_only() {
    let header_only = DatasetReader::new().read_bytes(b"a,b\n").unwrap();
    let profile = seeded().profile(&header_only);

    assert_eq!(profile.num_rows, 0);
    assert_eq!(profile.num_columns, 2);
    assert!(!profile.has_failures());
    for outcome in &profile.columns {
        let ColumnOutcome::Profiled(column) = outcome else {
            panic!("header-only column failed");
        };
        assert!(column.triggered.iter().all(|t| t.name == "no_nan"));
    }

    let none = Dataset::new(Vec::<String>::new(), vec![]).unwrap();
    assert!(seeded().profile(&none).columns.is_empty());
}

#[test]
fn test_all_missing_column_is_safe() {
    let dataset = Dataset::from_columns(vec![("n", strings(&["", "NA", "null"]))]).unwrap();
    let profile = seeded().profile(&dataset);
    let n = profile.column("n").unwrap();

    assert!(n.is_triggered("all_nan"));
    assert!(n.is_triggered("all_cells_same_value"));
    assert!(!n.is_triggered("contains_numeric"));
    assert!(!n.is_triggered("common_lengths"));
    assert!(!n.is_triggered("not_all_nan"));
    assert_eq!(n.present_count, 0);
}

#[test]
fn test_read_file_and_write_reports() {
    let mut input = NamedTempFile::new().unwrap();
    input
        .write_all(b"code,name\n007,Alice\n008,bob\n009, Bob\n")
        .unwrap();
    input.flush().unwrap();

    let mut profiler = seeded();
    profiler.extra_missing(["unknown"]);
    let profile = profiler.profile_path(input.path()).unwrap();

    let code = profile.column("code").unwrap();
    assert!(code.is_triggered("leading_zeros"));
    assert!(code.is_triggered("numeric_only"));
    assert!(profile.column("name").unwrap().is_triggered("strip_and_casefold_collapse"));

    let dir = tempfile::tempdir().unwrap();
    for format in [ReportFormat::Html, ReportFormat::Markdown, ReportFormat::Json] {
        let path = dir.path().join(format!("out.{}", format.extension()));
        write_report(&profile, format, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("leading_zeros"));
    }
}

#[test]
fn test_missing_file_is_load_error() {
    let result = Profiler::new().profile_path("/definitely/not/here.csv");
    assert!(matches!(result, Err(flenser::FlenserError::Io(_))));
}

#[test]
fn test_latin1_input_is_transcoded() {
    // "café" in Windows-1252, plus enough text for detection.
    let mut data = b"name\n".to_vec();
    for _ in 0..20 {
        data.extend_from_slice(b"caf\xe9 cr\xe8me br\xfbl\xe9e\n");
    }
    let dataset = DatasetReader::new().read_bytes(&data).unwrap();
    let first = &dataset.column(0).unwrap()[0];
    assert!(first.starts_with("caf"));
    assert!(!first.contains('\u{FFFD}'));
    assert_eq!(dataset.num_rows(), 20);
}

proptest! {
    #[test]
    fn prop_missing_marker_never_present(
        cells in prop::collection::vec(prop_oneof![
            Just(String::new()),
            Just("NULL".to_string()),
            Just(" NA ".to_string()),
            "[a-z0-9 ]{0,4}",
        ], 1..20)
    ) {
        let dataset = Dataset::from_columns(vec![("c", cells.clone())]).unwrap();
        let catalog = MissingCatalog::standard();
        let columns = normalize(&dataset, &catalog);

        for value in columns[0].present() {
            prop_assert!(!catalog.contains(value));
        }
        let missing = cells.iter().filter(|c| catalog.contains(c)).count();
        prop_assert_eq!(columns[0].missing_count(), missing);

        let exact = locate(&dataset, &catalog);
        let padded = locate_padded(&dataset, &catalog);
        if let (Some(e), Some(p)) = (exact.get("c"), padded.get("c")) {
            prop_assert!(e.is_disjoint(p));
        }
    }

    #[test]
    fn prop_catalog_rebuild_is_idempotent(extra in prop::collection::vec("[ -~]{0,5}", 0..6)) {
        let once = build_catalog(&extra);
        let again: Vec<String> = once.tokens().map(str::to_string).collect();
        prop_assert_eq!(build_catalog(&again), once);
    }
}
