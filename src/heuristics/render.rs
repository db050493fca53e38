//! Rendered heuristic output and the helpers that build it.

use foldhash::{HashMap, HashMapExt};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::Serialize;

use super::patterns::parse_numeric;
use crate::column::Column;

/// Output of a triggered heuristic.
///
/// Tables are structured data; turning them into markup is the report's job.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Rendering {
    Text(String),
    Table(Table),
}

impl Rendering {
    pub fn text(s: impl Into<String>) -> Self {
        Rendering::Text(s.into())
    }

    /// The text, if this is a text rendering.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Rendering::Text(s) => Some(s),
            Rendering::Table(_) => None,
        }
    }

    /// The table, if this is a table rendering.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Rendering::Table(t) => Some(t),
            Rendering::Text(_) => None,
        }
    }
}

/// A small rectangular table of display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }
}

/// Up to `size` distinct values drawn without replacement.
///
/// The sample shrinks to the number of candidates when there are fewer.
pub fn sample_distinct<'a>(candidates: &[&'a str], size: usize, rng: &mut StdRng) -> Vec<&'a str> {
    candidates.choose_multiple(rng, size).copied().collect()
}

/// `["a", "b"]`-style listing used inside text renderings.
pub fn format_list(values: &[&str]) -> String {
    format!("{values:?}")
}

/// Share of `part` in `whole` as a percentage rounded to two places.
pub fn percent(part: usize, whole: usize) -> String {
    if whole == 0 {
        return "0.00".to_string();
    }
    format!("{:.2}", part as f64 * 100.0 / whole as f64)
}

/// Magnitudes at or above this lose integer precision in `f64`.
const SCIENTIFIC_ABOVE: f64 = 1e15;
/// Non-zero magnitudes below this would round away at four decimals.
const SCIENTIFIC_BELOW: f64 = 1e-4;

/// Compact float display: up to four decimals, trailing zeros dropped.
///
/// Very large or very small magnitudes switch to exponent notation.
pub fn format_number(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    let magnitude = v.abs();
    if magnitude >= SCIENTIFIC_ABOVE || (magnitude > 0.0 && magnitude < SCIENTIFIC_BELOW) {
        let s = format!("{v:.4e}");
        return match s.split_once('e') {
            Some((mantissa, exponent)) => format!("{}e{exponent}", trim_decimals(mantissa)),
            None => s,
        };
    }
    let s = format!("{v:.4}");
    let s = trim_decimals(&s);
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn trim_decimals(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Frequency of each present-value length, with example values per length.
///
/// Rows are ordered by descending share, ties by ascending length.
pub fn length_table(column: &Column, sample_size: usize, rng: &mut StdRng) -> Table {
    let mut by_length: HashMap<usize, (usize, Vec<&str>)> = HashMap::new();
    for value in column.distinct_present() {
        by_length
            .entry(value.chars().count())
            .or_insert_with(|| (0, Vec::new()))
            .1
            .push(value);
    }
    let mut total = 0;
    for value in column.present() {
        total += 1;
        if let Some(entry) = by_length.get_mut(&value.chars().count()) {
            entry.0 += 1;
        }
    }

    let mut lengths: Vec<(usize, usize, Vec<&str>)> = by_length
        .into_iter()
        .map(|(len, (count, values))| (len, count, values))
        .collect();
    lengths.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let mut table = Table::new(["Value Lengths", "% of Total", "Examples"]);
    for (len, count, values) in lengths {
        let examples = sample_distinct(&values, sample_size, rng);
        table.push_row(vec![
            len.to_string(),
            percent(count, total),
            format_list(&examples),
        ]);
    }
    table
}

/// Share of each distinct present value.
///
/// Rows are ordered by descending share, ties by value.
pub fn value_table(column: &Column) -> Table {
    let total = column.present_count();
    let mut counts = column.present_counts();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut table = Table::new(["Unique Values", "% of Total"]);
    for (value, count) in counts {
        table.push_row(vec![value.to_string(), percent(count, total)]);
    }
    table
}

/// Descriptive statistics over the values that parse as numbers.
///
/// Returns `None` when nothing in the column is numeric.
pub fn describe(column: &Column) -> Option<Table> {
    let mut values: Vec<f64> = column.present().filter_map(parse_numeric).collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let std = if n < 2 {
        f64::NAN
    } else {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1) as f64).sqrt()
    };

    let mut table = Table::new(["Statistic", "Value"]);
    let stats = [
        ("count", n.to_string()),
        ("mean", format_number(mean)),
        ("std", format_number(std)),
        ("min", format_number(values[0])),
        ("25%", format_number(quantile(&values, 0.25))),
        ("50%", format_number(quantile(&values, 0.5))),
        ("75%", format_number(quantile(&values, 0.75))),
        ("max", format_number(values[n - 1])),
    ];
    for (name, value) in stats {
        table.push_row(vec![name.to_string(), value]);
    }
    Some(table)
}

/// Linear-interpolated quantile of sorted, non-empty data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
