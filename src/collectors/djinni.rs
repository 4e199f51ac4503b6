use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

use crate::error::ScrapeError;
use crate::models::job::{DetailFields, Job};

const CONTAINER: &str = "ul.list-unstyled";
const ITEM: &str = "li.list-jobs__item";
const DESCRIPTION: &str = "div.list-jobs__description";
const NAME: &str = "a.profile span";
const SALARY: &str = "span.public-salary-item";
const DETAILS_INFO: &str = "div.list-jobs__details__info a";
const LOCATION: &str = "span.location-text";
const BADGE: &str = "nobr";

/// Build the listing URL for `page` on the site rooted at `base`.
pub fn page_url(base: &Url, page: u32) -> Result<Url, ScrapeError> {
    let mut url = base
        .join("/jobs/")
        .map_err(|e| ScrapeError::InvalidUrl(format!("{base}: {e}")))?;
    url.query_pairs_mut()
        .clear()
        .append_pair("page", &page.to_string());
    Ok(url)
}

/// Maps a listing's ordered badge elements onto the detail fields.
///
/// Badge order is site specific, so this is the one piece to swap when the
/// listing markup changes.
pub trait DetailFieldMapper: Send + Sync {
    fn map(&self, badges: &[ElementRef<'_>]) -> DetailFields;
}

/// Reads badges from the end: English level is last, then experience, then
/// job type, and company type only when a fourth badge exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrailingBadgeMapper;

impl DetailFieldMapper for TrailingBadgeMapper {
    fn map(&self, badges: &[ElementRef<'_>]) -> DetailFields {
        if badges.len() < 2 {
            return DetailFields::default();
        }

        let from_end = |n: usize| {
            badges
                .len()
                .checked_sub(n)
                .and_then(|i| badges.get(i))
                .map(|badge| clean_badge(&trailing_text(badge)))
                .unwrap_or_default()
        };

        DetailFields {
            english_level: from_end(1),
            experience: from_end(2),
            job_type: from_end(3),
            company_type: from_end(4),
        }
    }
}

struct Selectors {
    container: Selector,
    item: Selector,
    description: Selector,
    name: Selector,
    salary: Selector,
    details_info: Selector,
    location: Selector,
    badge: Selector,
}

impl Selectors {
    fn new() -> Result<Self, ScrapeError> {
        Ok(Self {
            container: selector(CONTAINER)?,
            item: selector(ITEM)?,
            description: selector(DESCRIPTION)?,
            name: selector(NAME)?,
            salary: selector(SALARY)?,
            details_info: selector(DETAILS_INFO)?,
            location: selector(LOCATION)?,
            badge: selector(BADGE)?,
        })
    }
}

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(format!("{css}: {e:?}")))
}

/// Turns djinni.co listing pages into [`Job`] records.
pub struct DjinniParser {
    selectors: Selectors,
    mapper: Box<dyn DetailFieldMapper>,
}

impl DjinniParser {
    pub fn new() -> Result<Self, ScrapeError> {
        Self::with_mapper(TrailingBadgeMapper)
    }

    pub fn with_mapper(mapper: impl DetailFieldMapper + 'static) -> Result<Self, ScrapeError> {
        Ok(Self {
            selectors: Selectors::new()?,
            mapper: Box::new(mapper),
        })
    }

    /// Extract every listing on the page, one result per listing element.
    pub fn parse_page(&self, html: &str) -> Vec<Result<Job, ScrapeError>> {
        let document = Html::parse_document(html);
        let jobs = document
            .select(&self.selectors.container)
            .flat_map(|container| container.select(&self.selectors.item))
            .map(|listing| self.extract_job(listing))
            .collect();
        jobs
    }

    pub fn extract_job(&self, listing: ElementRef<'_>) -> Result<Job, ScrapeError> {
        let s = &self.selectors;

        let (company, contact_person) =
            split_company_contact(&child_text(listing, &s.details_info))?;

        let badges: Vec<_> = listing.select(&s.badge).collect();
        let details = self.mapper.map(&badges);

        Ok(Job {
            name: child_text(listing, &s.name),
            description: child_text(listing, &s.description).replace('\n', " "),
            salary: child_text(listing, &s.salary),
            company,
            contact_person,
            location: child_text(listing, &s.location).replace('\n', " "),
            experience: details.experience,
            english_level: details.english_level,
            job_type: details.job_type,
            company_type: details.company_type,
        })
    }
}

/// Concatenated text of every match below `element`, trimmed.
fn child_text(element: ElementRef<'_>, selector: &Selector) -> String {
    element
        .select(selector)
        .flat_map(|el| el.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Company name and recruiter share one link, separated by the first newline.
fn split_company_contact(info: &str) -> Result<(String, String), ScrapeError> {
    let (company, contact) = info.split_once('\n').ok_or_else(|| {
        ScrapeError::MalformedListing(format!("no contact person in company info {info:?}"))
    })?;
    Ok((
        company.to_string(),
        contact.replace('\n', " ").trim().to_string(),
    ))
}

/// Text of the badge's last child node.
fn trailing_text(badge: &ElementRef<'_>) -> String {
    let Some(node) = badge.last_child() else {
        return String::new();
    };
    match node.value() {
        Node::Text(text) => {
            let text: &str = text;
            text.to_owned()
        }
        _ => ElementRef::wrap(node)
            .map(|el| el.text().collect())
            .unwrap_or_default(),
    }
}

fn clean_badge(raw: &str) -> String {
    raw.strip_prefix('\n').unwrap_or(raw).trim().to_string()
}
