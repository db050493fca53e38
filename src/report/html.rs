//! Self-contained HTML page.

use std::fmt::Write;

use super::{catalog_label, list};
use crate::aggregate::{ColumnOutcome, DatasetProfile};
use crate::heuristics::{Rendering, Table};
use crate::locator::MissingFindings;
use crate::profiler::ColumnProfile;

const PAGE_OPEN: &str = include_str!("template.html");
const PAGE_CLOSE: &str = "</body></html>\n";
const BREAK: &str = "<br><br>\n";

pub(super) fn render(profile: &DatasetProfile) -> String {
    let mut out = String::from(PAGE_OPEN);

    // `write!` into a String cannot fail.
    let _ = write!(
        out,
        "Rows: {}, Columns: {}{BREAK}",
        profile.num_rows, profile.num_columns
    );
    let _ = write!(
        out,
        "NANs searched for ({}): {}<br>\nNANs found: {}<br>\n",
        catalog_label(profile),
        escape(&list(profile.catalog.tokens())),
        escape(&list(profile.found_tokens()))
    );

    findings_table(&mut out, &profile.missing_found, "NANs found");
    findings_table(&mut out, &profile.padded_missing, "NANs found with whitespace");
    overview_table(&mut out, profile);

    for outcome in &profile.columns {
        match outcome {
            ColumnOutcome::Profiled(column) => column_section(&mut out, column),
            ColumnOutcome::Failed {
                column,
                heuristic,
                message,
            } => {
                let _ = write!(
                    out,
                    "<h1><b>{}</b></h1>\n<p class=\"failed\">profiling failed in heuristic <code>{}</code>: {}</p>\n",
                    escape(column),
                    escape(heuristic),
                    escape(message)
                );
            }
        }
    }

    out.push_str(PAGE_CLOSE);
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
    out.push_str("<br>\n");
}

fn overview_table(out: &mut String, profile: &DatasetProfile) {
    let mut table = Table::new(["column name", "triggered tests"]);
    for outcome in &profile.columns {
        let tests = match outcome {
            ColumnOutcome::Profiled(p) => list(p.triggered_names()),
            ColumnOutcome::Failed { .. } => "(failed)".to_string(),
        };
        table.push_row(vec![outcome.column_name().to_string(), tests]);
    }
    write_table(out, &table);
}

fn column_section(out: &mut String, column: &ColumnProfile) {
    let _ = write!(
        out,
        "<h1><b>{}</b></h1>\nTriggered Tests: {}{BREAK}",
        escape(&column.name),
        escape(&list(column.triggered_names()))
    );
    let _ = write!(
        out,
        "Unique Values, count: {}, as share of non-NAN entries: {:.4}%{BREAK}",
        column.distinct_count,
        column.distinct_share()
    );

    for triggered in &column.triggered {
        match &triggered.rendering {
            Rendering::Text(text) => out.push_str(&escape(text)),
            Rendering::Table(table) => write_table(out, table),
        }
        out.push_str(BREAK);
    }
}

fn write_table(out: &mut String, table: &Table) {
    out.push_str("<table>\n<thead>\n<tr>");
    for header in &table.headers {
        let _ = write!(out, "<th>{}</th>", escape(header));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            let _ = write!(out, "<td>{}</td>", escape(cell));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
}

/// Escape text for HTML element content and attribute values.
fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a href='x'>&\"</a>"), "&lt;a href=&#39;x&#39;&gt;&amp;&quot;&lt;/a&gt;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_write_table() {
        let mut table = Table::new(["k", "v"]);
        table.push_row(vec!["a".to_string(), "<1>".to_string()]);
        let mut out = String::new();
        write_table(&mut out, &table);

        assert!(out.contains("<th>k</th><th>v</th>"));
        assert!(out.contains("<td>a</td><td>&lt;1&gt;</td>"));
    }
}
