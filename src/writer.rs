use std::fmt::Write as _;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::ScrapeError;
use crate::models::job::{Job, JobRow};

pub const HEADER: [&str; 8] = [
    "Company",
    "Position",
    "Salary",
    "Experience",
    "English Level",
    "Description",
    "Location",
    "Job Type",
];

/// `<dir>/<date>_jobs.csv`, with `date` rendered through `date_format`.
pub fn output_path(dir: &Path, date: NaiveDate, date_format: &str) -> Result<PathBuf, ScrapeError> {
    let mut stamp = String::new();
    write!(stamp, "{}", date.format(date_format))
        .map_err(|_| ScrapeError::DateFormat(date_format.to_string()))?;
    Ok(dir.join(format!("{stamp}_jobs.csv")))
}

/// Write the header and one row per job to `path`, replacing any existing
/// file. Only creating the file can fail; row and flush errors are logged
/// and dropped.
pub fn save_to_csv(jobs: &[Job], path: &Path) -> Result<(), ScrapeError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| ScrapeError::Output {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let file = File::create(path).map_err(|source| ScrapeError::Output {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if let Err(e) = writer.write_record(HEADER) {
        tracing::debug!("Failed writing CSV header: {e}");
    }
    for job in jobs {
        if let Err(e) = writer.serialize(JobRow::from(job)) {
            tracing::debug!("Failed writing row for '{}': {e}", job.name);
        }
    }

    if let Err(e) = writer.flush() {
        tracing::warn!("Failed flushing {}: {e}", path.display());
    }
    Ok(())
}
