use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Host not allowed: {url}")]
    HostNotAllowed { url: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Page {page} did not finish within {limit:?}")]
    Timeout { page: u32, limit: Duration },

    #[error("Malformed listing: {0}")]
    MalformedListing(String),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Failed creating file {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid date format '{0}'")]
    DateFormat(String),
}
