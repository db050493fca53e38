//! Fetching a remote CSV file into memory.

use std::io::Read;
use std::time::Duration;

use log::debug;
use thiserror::Error;

/// Default timeout for HTTP requests (60 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors that can occur during HTTP fetching.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("HTTP error {status}: {message}")]
    HttpStatus { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ureq::Error> for HttpError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => HttpError::HttpStatus {
                status: code,
                message: format!("Server returned status {code}"),
            },
            _ => HttpError::Network(err.to_string()),
        }
    }
}

/// Returns true if `source` should be fetched rather than opened as a file.
pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Download the whole body at `url`.
///
/// Profiling needs every row, so there is no partial download.
pub fn fetch_url(url: &str) -> Result<Vec<u8>, HttpError> {
    if !is_url(url) {
        return Err(HttpError::InvalidUrl(format!(
            "URL must start with http:// or https://: {url}"
        )));
    }

    let config = ureq::Agent::config_builder()
        .timeout_global(Some(DEFAULT_TIMEOUT))
        .build();
    let agent = ureq::Agent::new_with_config(config);

    let response = agent.get(url).call()?;
    let mut data = Vec::new();
    response.into_body().into_reader().read_to_end(&mut data)?;
    debug!("fetched {} bytes from {url}", data.len());

    Ok(data)
}
