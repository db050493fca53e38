//! Turning a [`DatasetProfile`] into a document.
//!
//! The profile is structured data; this module owns every formatting
//! decision, including how heuristic tables are laid out.

mod html;
mod markdown;

use std::fs;
use std::path::Path;

use log::info;

use crate::aggregate::DatasetProfile;
use crate::error::Result;

/// Output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ReportFormat {
    #[default]
    Html,
    Markdown,
    Json,
}

impl ReportFormat {
    /// Conventional file extension.
    pub const fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Html => "html",
            ReportFormat::Markdown => "md",
            ReportFormat::Json => "json",
        }
    }
}

/// Render the whole report into a string.
pub fn render(profile: &DatasetProfile, format: ReportFormat) -> Result<String> {
    Ok(match format {
        ReportFormat::Html => html::render(profile),
        ReportFormat::Markdown => markdown::render(profile),
        ReportFormat::Json => serde_json::to_string_pretty(profile)?,
    })
}

/// Render the report and write it to `path`.
pub fn write_report<P: AsRef<Path>>(
    profile: &DatasetProfile,
    format: ReportFormat,
    path: P,
) -> Result<()> {
    let document = render(profile, format)?;
    fs::write(path.as_ref(), document)?;
    info!("report written to {}", path.as_ref().display());
    Ok(())
}

/// Which catalog was used, for the summary header.
fn catalog_label(profile: &DatasetProfile) -> &'static str {
    if profile.catalog.extra_count() == 0 {
        "standard"
    } else {
        "standard and user-specified"
    }
}

/// `["a", "b"]`-style listing.
fn list<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
    format!("{:?}", values.into_iter().collect::<Vec<_>>())
}
