//! Reading delimited text into a [`Dataset`].

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use foldhash::{HashMap, HashMapExt};
use log::{debug, info};

use crate::dataset::Dataset;
use crate::encoding::{SourceEncoding, decode};
use crate::error::{FlenserError, Result};

/// Quote character configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quote {
    /// No quoting.
    None,
    /// Quote with the specified character.
    Some(u8),
}

impl Default for Quote {
    fn default() -> Self {
        Quote::Some(b'"')
    }
}

/// Loads a whole delimited-text file into memory as raw strings.
///
/// The first record is the header. Every cell is kept verbatim; missing-value
/// interpretation is left to the catalog.
///
/// # Example
///
/// ```no_run
/// use flenser::{DatasetReader, Quote};
///
/// let mut reader = DatasetReader::new();
/// reader.delimiter(b';').quote(Quote::None);
///
/// let dataset = reader.read_path("data.csv").unwrap();
/// println!("{} rows", dataset.num_rows());
/// ```
#[derive(Debug, Clone)]
pub struct DatasetReader {
    delimiter: u8,
    quote: Quote,
    trim_header: bool,
}

impl Default for DatasetReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetReader {
    /// Create a reader for comma-separated, double-quoted input.
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            quote: Quote::default(),
            trim_header: false,
        }
    }

    /// Set the field delimiter.
    pub fn delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the quote character.
    pub fn quote(&mut self, quote: Quote) -> &mut Self {
        self.quote = quote;
        self
    }

    /// Trim surrounding whitespace from header names (cells are never trimmed).
    pub fn trim_header(&mut self, yes: bool) -> &mut Self {
        self.trim_header = yes;
        self
    }

    /// Read the file at the given path.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let path = path.as_ref();
        debug!("reading {}", path.display());
        let file = File::open(path)?;
        self.read_reader(std::io::BufReader::new(file))
    }

    /// Read everything from a reader.
    pub fn read_reader<R: Read>(&self, mut reader: R) -> Result<Dataset> {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        self.read_bytes(&buffer)
    }

    /// Parse a dataset from raw bytes.
    pub fn read_bytes(&self, data: &[u8]) -> Result<Dataset> {
        if data.is_empty() {
            return Err(FlenserError::EmptyData);
        }

        let decoded = decode(data);
        if let SourceEncoding::Transcoded(name) = decoded.source {
            info!("input transcoded from {name} to UTF-8");
        }

        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true);
        match self.quote {
            Quote::None => {
                builder.quoting(false);
            }
            Quote::Some(q) => {
                builder.quoting(true).quote(q);
            }
        }

        let mut reader = builder.from_reader(Cursor::new(decoded.bytes.as_ref()));
        let mut record = csv::StringRecord::new();

        if !reader.read_record(&mut record)? {
            return Err(FlenserError::EmptyData);
        }
        let header: Vec<&str> = record
            .iter()
            .map(|h| if self.trim_header { h.trim() } else { h })
            .collect();
        let names = dedup_names(&header);
        let width = names.len();

        let mut rows: Vec<Vec<String>> = Vec::new();
        while reader.read_record(&mut record)? {
            if record.len() > width {
                return Err(FlenserError::RaggedRow {
                    row: rows.len() + 1,
                    expected: width,
                    found: record.len(),
                });
            }
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            // Short rows are padded with blanks, which the catalog treats as missing.
            row.resize(width, String::new());
            rows.push(row);
        }

        Dataset::new(names, rows)
    }
}

/// Make header names unique by suffixing repeats with `.1`, `.2`, ...
fn dedup_names(header: &[&str]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::with_capacity(header.len());
    let mut taken: Vec<String> = Vec::with_capacity(header.len());

    for &name in header {
        let mut candidate = name.to_string();
        while taken.contains(&candidate) {
            let n = counts.entry(name.to_string()).or_insert(0);
            *n += 1;
            candidate = format!("{name}.{n}");
        }
        taken.push(candidate);
    }

    taken
}
