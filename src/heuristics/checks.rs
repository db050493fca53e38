//! The built-in heuristics.
//!
//! Predicates that say "every present value ..." require at least one present
//! value, so an all-missing column never claims a format. Renderers that
//! coerce or sample only run behind a predicate that guarantees input.

use foldhash::HashSet;
use rand::rngs::StdRng;

use super::patterns::{
    LEADING_ZEROS_PATTERN, SALESFORCE_ID_15_PATTERN, SALESFORCE_ID_18_PATTERN, cmp_digits,
    is_alpha, is_digits, looks_like_record_id, parse_numeric,
};
use super::render::{
    Rendering, describe, format_list, length_table, percent, sample_distinct, value_table,
};
use super::{Context, Heuristic};
use crate::column::Column;

type RenderResult = Result<Rendering, String>;

pub(super) fn standard_heuristics() -> Vec<Heuristic> {
    vec![
        Heuristic::new("all_nan", all_nan, |_, _, _| {
            Ok(Rendering::text("NAN values only"))
        }),
        Heuristic::new("not_all_nan", not_all_nan, render_sample_values),
        Heuristic::new("has_nan", has_nan, render_nan_share),
        Heuristic::new("no_nan", no_nan, |_, _, _| {
            Ok(Rendering::text("% NAN: no NAN values found"))
        }),
        Heuristic::new(
            "all_cells_same_value",
            all_cells_same_value,
            render_same_value,
        ),
        Heuristic::new("all_unique", all_unique, |_, _, _| {
            Ok(Rendering::text("all values are unique"))
        }),
        Heuristic::new("unique_id", unique_id, render_unique_id),
        Heuristic::new("row_index_0", row_index_0, |_, _, _| {
            Ok(Rendering::text(
                "column values form a row index, initialized at zero",
            ))
        }),
        Heuristic::new("row_index_1", row_index_1, |_, _, _| {
            Ok(Rendering::text(
                "column values form a row index, initialized at one",
            ))
        }),
        Heuristic::new(
            "strip_and_casefold_collapse",
            strip_and_casefold_collapse,
            render_collapse,
        ),
        Heuristic::new("salesforceid_15", salesforce_id_15, |_, _, _| {
            Ok(Rendering::text(
                "one or more entries could be Salesforce IDs (15 characters)",
            ))
        }),
        Heuristic::new("salesforceid_18", salesforce_id_18, |_, _, _| {
            Ok(Rendering::text(
                "one or more entries could be Salesforce IDs (18 characters)",
            ))
        }),
        Heuristic::new("numeric_only", numeric_only, |_, _, _| {
            Ok(Rendering::text("all values are numeric only (or nan)"))
        }),
        Heuristic::new(
            "numeric_only_unique_over_max",
            numeric_only_unique_over_max,
            render_digit_range,
        ),
        Heuristic::new("alpha_only", alpha_only, |_, _, _| {
            Ok(Rendering::text(
                "all values are alpha only (or nan) (no spaces, no specials)",
            ))
        }),
        Heuristic::new(
            "matches_nan_with_spaces",
            matches_nan_with_spaces,
            render_padded_missing,
        ),
        Heuristic::new(
            "leading_trailing_spaces",
            leading_trailing_spaces,
            render_padded_values,
        ),
        Heuristic::new("boolean_like", boolean_like, render_boolean_pair),
        Heuristic::new("leading_zeros", leading_zeros, render_leading_zeros),
        Heuristic::new("common_lengths", common_lengths, |column, ctx, rng| {
            Ok(Rendering::Table(length_table(
                column,
                ctx.thresholds.sample_size,
                rng,
            )))
        }),
        Heuristic::new("unique_under_max", unique_under_max, |column, _, _| {
            Ok(Rendering::Table(value_table(column)))
        }),
        Heuristic::new("contains_numeric", contains_numeric, |column, _, _| {
            describe(column)
                .map(Rendering::Table)
                .ok_or_else(|| "no numeric values to describe".to_string())
        }),
    ]
}

// Missingness

fn all_nan(column: &Column, _: &Context<'_>) -> bool {
    column.all_missing()
}

fn not_all_nan(column: &Column, _: &Context<'_>) -> bool {
    column.present().next().is_some()
}

fn has_nan(column: &Column, _: &Context<'_>) -> bool {
    column.has_missing()
}

fn no_nan(column: &Column, _: &Context<'_>) -> bool {
    !column.has_missing()
}

fn render_sample_values(column: &Column, ctx: &Context<'_>, rng: &mut StdRng) -> RenderResult {
    let distinct = column.distinct_present();
    let sample = sample_distinct(&distinct, ctx.thresholds.sample_size, rng);
    Ok(Rendering::text(format!(
        "sample values, without replacement: {}",
        format_list(&sample)
    )))
}

fn render_nan_share(column: &Column, _: &Context<'_>, _: &mut StdRng) -> RenderResult {
    Ok(Rendering::text(format!(
        "% NAN: {}",
        percent(column.missing_count(), column.len())
    )))
}

// Cardinality

fn all_cells_same_value(column: &Column, _: &Context<'_>) -> bool {
    column.cell_counts().len() == 1
}

fn all_unique(column: &Column, _: &Context<'_>) -> bool {
    !column.is_empty() && column.cell_counts().values().all(|&n| n == 1)
}

fn unique_id(column: &Column, _: &Context<'_>) -> bool {
    !column.is_empty() && !column.has_missing() && column.distinct_present_count() == column.len()
}

fn boolean_like(column: &Column, _: &Context<'_>) -> bool {
    column.distinct_present_count() == 2
}

fn unique_under_max(column: &Column, ctx: &Context<'_>) -> bool {
    let n = column.distinct_present_count();
    n > 0 && n <= ctx.thresholds.unique_max
}

fn strip_and_casefold_collapse(column: &Column, _: &Context<'_>) -> bool {
    let distinct = column.distinct_present();
    folded_count(&distinct) < distinct.len()
}

fn folded_count(distinct: &[&str]) -> usize {
    distinct
        .iter()
        .map(|v| caseless::default_case_fold_str(v.trim()))
        .collect::<HashSet<_>>()
        .len()
}

fn render_same_value(column: &Column, _: &Context<'_>, _: &mut StdRng) -> RenderResult {
    let value = match column.cells().first() {
        Some(Some(v)) => v.as_str(),
        Some(None) => "<missing>",
        None => return Err("column has no cells".to_string()),
    };
    Ok(Rendering::text(format!(
        "all cells have same value: {value}"
    )))
}

fn render_unique_id(column: &Column, _: &Context<'_>, _: &mut StdRng) -> RenderResult {
    let first = column
        .present()
        .next()
        .ok_or_else(|| "column has no values".to_string())?;
    Ok(Rendering::text(format!(
        "column can function as a unique identifier, first value is of form: {first}"
    )))
}

fn render_collapse(column: &Column, _: &Context<'_>, _: &mut StdRng) -> RenderResult {
    let distinct = column.distinct_present();
    Ok(Rendering::text(format!(
        "whitespace and/or casefolding merges one or more values: {} distinct values become {}",
        distinct.len(),
        folded_count(&distinct)
    )))
}

fn render_boolean_pair(column: &Column, _: &Context<'_>, _: &mut StdRng) -> RenderResult {
    let distinct = column.distinct_present();
    match distinct.as_slice() {
        [a, b] => Ok(Rendering::text(format!(
            "exactly two distinct values: {a:?} and {b:?}"
        ))),
        _ => Err("expected exactly two distinct values".to_string()),
    }
}

// Row index

fn row_index_0(column: &Column, _: &Context<'_>) -> bool {
    is_row_index(column, 0)
}

fn row_index_1(column: &Column, _: &Context<'_>) -> bool {
    is_row_index(column, 1)
}

/// Every cell is an integer and, sorted, they count up from `start` by one
/// for exactly as many rows as the column has.
fn is_row_index(column: &Column, start: i64) -> bool {
    if column.is_empty() || column.has_missing() {
        return false;
    }
    let parsed: Option<Vec<i64>> = column.present().map(|v| v.parse::<i64>().ok()).collect();
    let Some(mut values) = parsed else {
        return false;
    };
    values.sort_unstable();
    values
        .iter()
        .zip(start..)
        .all(|(&value, expected)| value == expected)
}

// Format signatures

fn salesforce_id_15(column: &Column, _: &Context<'_>) -> bool {
    column
        .present()
        .any(|v| looks_like_record_id(v, &SALESFORCE_ID_15_PATTERN))
}

fn salesforce_id_18(column: &Column, _: &Context<'_>) -> bool {
    column
        .present()
        .any(|v| looks_like_record_id(v, &SALESFORCE_ID_18_PATTERN))
}

/// At least one present value, and every present value satisfies `test`.
fn every_present(column: &Column, test: impl Fn(&str) -> bool) -> bool {
    let mut values = column.present().peekable();
    values.peek().is_some() && values.all(test)
}

fn numeric_only(column: &Column, _: &Context<'_>) -> bool {
    every_present(column, is_digits)
}

fn numeric_only_unique_over_max(column: &Column, ctx: &Context<'_>) -> bool {
    every_present(column, is_digits) && column.distinct_present_count() > ctx.thresholds.unique_max
}

fn alpha_only(column: &Column, _: &Context<'_>) -> bool {
    every_present(column, is_alpha)
}

fn leading_zeros(column: &Column, _: &Context<'_>) -> bool {
    column.present().any(|v| LEADING_ZEROS_PATTERN.is_match(v))
}

fn contains_numeric(column: &Column, _: &Context<'_>) -> bool {
    column.present().any(|v| parse_numeric(v).is_some())
}

fn common_lengths(column: &Column, ctx: &Context<'_>) -> bool {
    let lengths: HashSet<usize> = column.present().map(|v| v.chars().count()).collect();
    !lengths.is_empty() && lengths.len() < ctx.thresholds.max_common_lengths
}

fn render_digit_range(column: &Column, _: &Context<'_>, _: &mut StdRng) -> RenderResult {
    let min = column.present().min_by(|a, b| cmp_digits(a, b));
    let max = column.present().max_by(|a, b| cmp_digits(a, b));
    match (min, max) {
        (Some(min), Some(max)) => Ok(Rendering::text(format!(
            "min value: {min}  max value: {max}"
        ))),
        _ => Err("column has no values".to_string()),
    }
}

fn render_leading_zeros(column: &Column, ctx: &Context<'_>, rng: &mut StdRng) -> RenderResult {
    render_matching(
        column,
        ctx,
        rng,
        |v| LEADING_ZEROS_PATTERN.is_match(v),
        "have leading zeros",
    )
}

// Whitespace

fn matches_nan_with_spaces(_: &Column, ctx: &Context<'_>) -> bool {
    ctx.padded_missing.is_some_and(|found| !found.is_empty())
}

fn leading_trailing_spaces(column: &Column, _: &Context<'_>) -> bool {
    column.present().any(has_outer_whitespace)
}

fn has_outer_whitespace(v: &str) -> bool {
    v.trim().len() != v.len()
}

fn render_padded_missing(_: &Column, ctx: &Context<'_>, _: &mut StdRng) -> RenderResult {
    let found: Vec<&str> = ctx
        .padded_missing
        .into_iter()
        .flatten()
        .map(String::as_str)
        .collect();
    if found.is_empty() {
        return Err("no padded missing values recorded".to_string());
    }
    Ok(Rendering::text(format!(
        "values match a NAN token once surrounding whitespace is stripped: {}",
        format_list(&found)
    )))
}

fn render_padded_values(column: &Column, ctx: &Context<'_>, rng: &mut StdRng) -> RenderResult {
    render_matching(
        column,
        ctx,
        rng,
        has_outer_whitespace,
        "have leading or trailing whitespace",
    )
}

/// "N values <what>, e.g. [...]" over present values passing `test`.
fn render_matching(
    column: &Column,
    ctx: &Context<'_>,
    rng: &mut StdRng,
    test: impl Fn(&str) -> bool,
    what: &str,
) -> RenderResult {
    let count = column.present().filter(|&v| test(v)).count();
    let candidates: Vec<&str> = column
        .distinct_present()
        .into_iter()
        .filter(|&v| test(v))
        .collect();
    if candidates.is_empty() {
        return Err(format!("no values {what}"));
    }
    let sample = sample_distinct(&candidates, ctx.thresholds.sample_size, rng);
    Ok(Rendering::text(format!(
        "{count} values {what}, e.g. {}",
        format_list(&sample)
    )))
}
