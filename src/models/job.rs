use serde::Serialize;

/// A single scraped listing. Absent fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Job {
    pub name: String,
    pub description: String,
    pub salary: String,
    pub company: String,
    pub contact_person: String,
    pub location: String,
    pub experience: String,
    pub english_level: String,
    pub job_type: String,
    pub company_type: String,
}

/// The badge-derived part of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailFields {
    pub experience: String,
    pub english_level: String,
    pub job_type: String,
    pub company_type: String,
}

/// One CSV row, in the fixed export column order. Column titles live in
/// `writer::HEADER`.
#[derive(Debug, Serialize)]
pub struct JobRow<'a> {
    pub company: &'a str,
    pub position: &'a str,
    pub salary: &'a str,
    pub experience: &'a str,
    pub english_level: &'a str,
    pub description: &'a str,
    pub location: &'a str,
    pub job_type: &'a str,
}

impl<'a> From<&'a Job> for JobRow<'a> {
    fn from(job: &'a Job) -> Self {
        Self {
            company: &job.company,
            position: &job.name,
            salary: &job.salary,
            experience: &job.experience,
            english_level: &job.english_level,
            description: &job.description,
            location: &job.location,
            job_type: &job.job_type,
        }
    }
}
