// Page collection: fetching, listing extraction and the concurrent runner.

pub mod djinni;
pub mod http;
pub mod runner;

use async_trait::async_trait;
use url::Url;

use crate::error::ScrapeError;

/// Source of raw listing pages.
/// The runner only depends on this trait so tests can serve fixture HTML.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page body, failing on transport errors, non-success
    /// statuses and hosts outside the allowed one.
    async fn fetch(&self, url: &Url) -> Result<String, ScrapeError>;
}

#[cfg(test)]
pub(crate) mod fixtures;
