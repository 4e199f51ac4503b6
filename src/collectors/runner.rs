use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use url::Url;

use crate::collectors::PageFetcher;
use crate::collectors::djinni::{DjinniParser, page_url};
use crate::error::ScrapeError;
use crate::models::job::Job;
use crate::models::job_collection::JobCollection;

/// Completion signal of a single page task.
#[derive(Debug)]
pub struct PageOutcome {
    pub page: u32,
    /// Jobs appended by this page, or the rendered error that stopped it.
    pub result: Result<usize, String>,
}

#[derive(Debug)]
pub struct RunReport {
    pub jobs: Vec<Job>,
    /// One entry per page, ordered by page index.
    pub pages: Vec<PageOutcome>,
}

impl RunReport {
    pub fn failed_pages(&self) -> impl Iterator<Item = &PageOutcome> {
        self.pages.iter().filter(|p| p.result.is_err())
    }
}

/// Runs one scraping task per page in parallel and gathers their jobs.
pub struct Orchestrator {
    fetcher: Arc<dyn PageFetcher>,
    parser: Arc<DjinniParser>,
    base_url: Url,
    page_count: u32,
    page_timeout: Option<Duration>,
}

impl Orchestrator {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        parser: DjinniParser,
        base_url: Url,
        page_count: u32,
    ) -> Self {
        Self {
            fetcher,
            parser: Arc::new(parser),
            base_url,
            page_count,
            page_timeout: None,
        }
    }

    /// Bound each page task; a page that overruns counts as failed.
    pub fn with_page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout = Some(timeout);
        self
    }

    /// Scrape pages `0..page_count` concurrently and wait for all of them.
    /// Page failures are recorded in the report, never returned.
    pub async fn run(&self) -> RunReport {
        let collection = Arc::new(JobCollection::new());

        tracing::info!(
            "Scraping {} pages from {}",
            self.page_count,
            self.base_url
        );

        let handles: Vec<_> = (0..self.page_count)
            .map(|page| {
                let fetcher = Arc::clone(&self.fetcher);
                let parser = Arc::clone(&self.parser);
                let base_url = self.base_url.clone();
                let collection = Arc::clone(&collection);
                let page_timeout = self.page_timeout;

                tokio::spawn(async move {
                    let scrape =
                        scrape_page(fetcher.as_ref(), &parser, &base_url, page, &collection);
                    match page_timeout {
                        Some(limit) => tokio::time::timeout(limit, scrape)
                            .await
                            .unwrap_or_else(|_| {
                                Err(ScrapeError::Timeout { page, limit })
                            }),
                        None => scrape.await,
                    }
                })
            })
            .collect();

        let pages: Vec<PageOutcome> = join_all(handles)
            .await
            .into_iter()
            .zip(0..)
            .map(|(joined, page)| {
                let result = match joined {
                    Ok(Ok(count)) => Ok(count),
                    Ok(Err(e)) => {
                        tracing::error!("Error while scraping page {page}: {e}");
                        Err(e.to_string())
                    }
                    Err(e) => {
                        tracing::error!("Page {page} task aborted: {e}");
                        Err(format!("task aborted: {e}"))
                    }
                };
                PageOutcome { page, result }
            })
            .collect();

        // Every task has finished, so this is the last handle.
        let jobs = Arc::into_inner(collection)
            .map(JobCollection::into_jobs)
            .unwrap_or_default();

        let report = RunReport { jobs, pages };
        tracing::info!(
            "Collected {} jobs, {} of {} pages failed",
            report.jobs.len(),
            report.failed_pages().count(),
            self.page_count
        );
        report
    }
}

/// Fetch and parse one listing page, appending each extracted job.
///
/// Listings that fail extraction are logged and skipped. Returns the number
/// of jobs appended.
pub async fn scrape_page(
    fetcher: &dyn PageFetcher,
    parser: &DjinniParser,
    base_url: &Url,
    page: u32,
    jobs: &JobCollection,
) -> Result<usize, ScrapeError> {
    let url = page_url(base_url, page)?;
    let html = fetcher.fetch(&url).await?;

    let mut appended = 0;
    for listing in parser.parse_page(&html) {
        match listing {
            Ok(job) => {
                tracing::debug!(
                    company = %job.company,
                    contact = %job.contact_person,
                    company_type = %job.company_type,
                    "Parsed '{}'",
                    job.name
                );
                jobs.append(job);
                appended += 1;
            }
            Err(e) => tracing::warn!("Skipping listing on page {page}: {e}"),
        }
    }

    tracing::info!("Page {page}: {appended} jobs collected");
    Ok(appended)
}
