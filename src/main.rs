//! flenser CLI - profile a CSV file and write a data-quality report

use clap::Parser;
use flenser::{
    Dataset, DatasetReader, FlenserError, Profiler, Quote, ReportFormat, Thresholds, write_report,
};
use log::{LevelFilter, error, info, warn};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Column-by-column data-quality triage for CSV files.
///
/// Reports missing-value tokens (including whitespace-padded ones) and, for
/// every column, which structural heuristics it triggers.
#[derive(Parser, Debug)]
#[command(name = "flenser")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input CSV file (or http(s) URL when built with the `http` feature)
    file: String,

    /// Extra tokens to treat as missing, on top of the standard list
    extra_missing: Vec<String>,

    /// Output file (default: flenser_output.<format extension>)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "html")]
    format: ReportFormat,

    /// Field delimiter (single character)
    #[arg(short = 'd', long, default_value = ",")]
    delimiter: char,

    /// Quote character (single character, or 'none')
    #[arg(short = 'q', long)]
    quote: Option<String>,

    /// Fix the random seed used for sampled example values
    #[arg(long)]
    seed: Option<u64>,

    /// Profile columns one after another instead of in parallel
    #[arg(long)]
    sequential: bool,

    /// Largest distinct-value count that still gets a value table
    #[arg(long, default_value = "25")]
    unique_max: usize,

    /// Open the report with the platform's default application
    #[arg(long)]
    open: bool,

    /// Debug logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("Error processing {}: {}", args.file, e);
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when the report was written but some column failed.
fn run(args: &Args) -> Result<bool, FlenserError> {
    let dataset = load(args)?;

    let mut profiler = Profiler::new();
    profiler
        .extra_missing(args.extra_missing.iter().cloned())
        .parallel(!args.sequential)
        .thresholds(Thresholds {
            unique_max: args.unique_max,
            ..Thresholds::default()
        });
    if let Some(seed) = args.seed {
        profiler.seed(seed);
    }

    let catalog = profiler.catalog();
    if catalog.extra_count() == 0 {
        info!("Using standard nan values: {:?}", catalog.tokens().collect::<Vec<_>>());
    } else {
        info!(
            "Using standard and user-specified nan values: {:?}",
            catalog.tokens().collect::<Vec<_>>()
        );
    }

    let profile = profiler.profile_with_catalog(&dataset, catalog);

    let output = args.output.clone().unwrap_or_else(|| {
        PathBuf::from(format!("flenser_output.{}", args.format.extension()))
    });
    write_report(&profile, args.format, &output)?;
    println!("Results saved as '{}'", output.display());

    for failed in profile.failures() {
        warn!("column {:?} could not be fully profiled", failed.column_name());
    }

    if args.open {
        open_in_browser(&output);
    }

    Ok(!profile.has_failures())
}

fn load(args: &Args) -> Result<Dataset, FlenserError> {
    if !args.delimiter.is_ascii() {
        return Err(FlenserError::InvalidConfig(format!(
            "delimiter must be a single ASCII character, got {:?}",
            args.delimiter
        )));
    }

    let mut reader = DatasetReader::new();
    reader.delimiter(args.delimiter as u8);
    if let Some(ref quote_str) = args.quote {
        if quote_str.eq_ignore_ascii_case("none") {
            reader.quote(Quote::None);
        } else {
            match quote_str.chars().next() {
                Some(c) if c.is_ascii() && quote_str.len() == 1 => {
                    reader.quote(Quote::Some(c as u8));
                }
                _ => {
                    return Err(FlenserError::InvalidConfig(format!(
                        "quote must be a single ASCII character or 'none', got {quote_str:?}"
                    )));
                }
            }
        }
    }

    #[cfg(feature = "http")]
    if flenser::http::is_url(&args.file) {
        let data = flenser::http::fetch_url(&args.file)?;
        return reader.read_bytes(&data);
    }

    reader.read_path(Path::new(&args.file))
}

fn open_in_browser(path: &Path) {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    };
    info!("Attempting to open results with {opener}");
    if let Err(e) = std::process::Command::new(opener).arg(path).status() {
        warn!("could not launch {opener}: {e}");
    }
}
