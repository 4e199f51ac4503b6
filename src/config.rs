use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "djinni-scraper", about = "Scrape djinni.co job listings into a dated CSV file")]
pub struct Config {
    /// Number of listing pages to fetch, starting at page 0
    #[arg(long, default_value = "3")]
    pub pages: u32,

    /// Site root; only this host is ever contacted
    #[arg(long, default_value = "https://djinni.co")]
    pub base_url: String,

    /// Directory the CSV file is written into
    #[arg(long, default_value = "Results")]
    pub output_dir: PathBuf,

    /// chrono format string for the date prefix of the output file
    #[arg(long, default_value = "%Y-%d-%m")]
    pub date_format: String,

    /// User-Agent header sent with every request
    #[arg(
        long,
        default_value = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36"
    )]
    pub user_agent: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value = "30")]
    pub request_timeout_secs: u64,

    /// Upper bound on a single page task, in seconds (unbounded if unset)
    #[arg(long)]
    pub page_timeout_secs: Option<u64>,
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn page_timeout(&self) -> Option<Duration> {
        self.page_timeout_secs.map(Duration::from_secs)
    }
}
