//! Markdown document with pipe tables.

use std::fmt::Write;

use super::{catalog_label, list};
use crate::aggregate::{ColumnOutcome, DatasetProfile};
use crate::heuristics::{Rendering, Table};
use crate::locator::MissingFindings;

pub(super) fn render(profile: &DatasetProfile) -> String {
    let mut out = String::from("# Data profile\n\n");

    let _ = writeln!(
        out,
        "Rows: {}, Columns: {}\n",
        profile.num_rows, profile.num_columns
    );
    let _ = writeln!(
        out,
        "NANs searched for ({}): {}\n",
        catalog_label(profile),
        code_span(&list(profile.catalog.tokens()))
    );
    let _ = writeln!(
        out,
        "NANs found: {}\n",
        code_span(&list(profile.found_tokens()))
    );

    findings_table(&mut out, &profile.missing_found, "NANs found");
    findings_table(&mut out, &profile.padded_missing, "NANs found with whitespace");

    let mut overview = Table::new(["column name", "triggered tests"]);
    for outcome in &profile.columns {
        let tests = match outcome {
            ColumnOutcome::Profiled(p) => list(p.triggered_names()),
            ColumnOutcome::Failed { .. } => "(failed)".to_string(),
        };
        overview.push_row(vec![outcome.column_name().to_string(), tests]);
    }
    write_table(&mut out, &overview);

    for outcome in &profile.columns {
        match outcome {
            ColumnOutcome::Profiled(column) => {
                let _ = writeln!(out, "## {}\n", escape_inline(&column.name));
                let _ = writeln!(
                    out,
                    "Triggered Tests: {}\n",
                    code_span(&list(column.triggered_names()))
                );
                let _ = writeln!(
                    out,
                    "Unique Values, count: {}, as share of non-NAN entries: {:.4}%\n",
                    column.distinct_count,
                    column.distinct_share()
                );
                for triggered in &column.triggered {
                    let _ = writeln!(out, "**{}**\n", escape_inline(triggered.name));
                    match &triggered.rendering {
                        Rendering::Text(text) => {
                            let _ = writeln!(out, "{}\n", escape_inline(text));
                        }
                        Rendering::Table(table) => write_table(&mut out, table),
                    }
                }
            }
            ColumnOutcome::Failed {
                column,
                heuristic,
                message,
            } => {
                let _ = writeln!(
                    out,
                    "## {}\n\nprofiling failed in heuristic {}: {}\n",
                    escape_inline(column),
                    code_span(heuristic),
                    escape_inline(message)
                );
            }
        }
    }

    out
}

fn findings_table(out: &mut String, findings: &MissingFindings, label: &str) {
    if findings.is_empty() {
        return;
    }
    let mut table = Table::new(["column name", label]);
    for (column, tokens) in findings {
        table.push_row(vec![column.clone(), list(tokens.iter().map(String::as_str))]);
    }
    write_table(out, &table);
}

fn write_table(out: &mut String, table: &Table) {
    write_row(out, &table.headers);
    out.push('|');
    for _ in &table.headers {
        out.push_str(" --- |");
    }
    out.push('\n');
    for row in &table.rows {
        write_row(out, row);
    }
    out.push('\n');
}

fn write_row(out: &mut String, cells: &[String]) {
    out.push('|');
    for cell in cells {
        let _ = write!(out, " {} |", escape_inline(cell));
    }
    out.push('\n');
}

/// Backslash-escapes inline Markdown syntax; newlines would end a table
/// row or paragraph, so they become spaces.
fn escape_inline(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' | '\r' => out.push(' '),
            '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '#' | '|' | '~' | '!' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Code span whose fence is longer than any backtick run inside `s`.
fn code_span(s: &str) -> String {
    let s = s.replace(['\n', '\r'], " ");
    let mut longest = 0;
    let mut run = 0;
    for c in s.chars() {
        run = if c == '`' { run + 1 } else { 0 };
        longest = longest.max(run);
    }
    if longest == 0 {
        format!("`{s}`")
    } else {
        let fence = "`".repeat(longest + 1);
        format!("{fence} {s} {fence}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_table() {
        let mut table = Table::new(["a", "b"]);
        table.push_row(vec!["x|y".to_string(), "1\n2".to_string()]);
        let mut out = String::new();
        write_table(&mut out, &table);

        assert_eq!(out, "| a | b |\n| --- | --- |\n| x\\|y | 1 2 |\n\n");
    }

    #[test]
    fn test_escape_inline() {
        assert_eq!(escape_inline("a|b"), "a\\|b");
        assert_eq!(escape_inline("*bold* `x`"), "\\*bold\\* \\`x\\`");
        assert_eq!(escape_inline("# one\ntwo"), "\\# one two");
        assert_eq!(escape_inline("plain 1.5%"), "plain 1.5%");
    }

    #[test]
    fn test_code_span_outgrows_backticks() {
        assert_eq!(code_span("[\"NA\"]"), "`[\"NA\"]`");
        assert_eq!(code_span("a`b"), "`` a`b ``");
        assert_eq!(code_span("``"), "``` `` ```");
    }

    #[test]
    fn test_column_names_and_text_are_escaped() {
        let dataset = crate::dataset::Dataset::from_columns(vec![(
            "a|b",
            vec!["*x*".to_string(), "`y`".to_string()],
        )])
        .unwrap();
        let mut profiler = crate::aggregate::Profiler::new();
        profiler.seed(5);
        let out = render(&profiler.profile(&dataset));

        assert!(out.contains("## a\\|b\n"));
        assert!(out.contains("| a\\|b |"));
        assert!(!out.contains("*x*"));
        assert!(out.contains("\\*x\\*"));
        assert!(!out.lines().any(|line| line.starts_with("## ") && line.contains("a|b")));
    }
}
