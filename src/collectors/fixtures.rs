// Listing markup shaped like djinni.co's job list.

pub struct Listing<'a> {
    pub name: &'a str,
    pub company_info: &'a str,
    pub salary: Option<&'a str>,
    pub badges: &'a [&'a str],
}

impl Default for Listing<'_> {
    fn default() -> Self {
        Self {
            name: "Rust Engineer",
            company_info: "Acme\n  Jane\nDoe",
            salary: Some("$5000"),
            badges: &[
                "Product",
                "Remote",
                "3 years of experience",
                "Upper-Intermediate",
            ],
        }
    }
}

pub fn listing(l: &Listing<'_>) -> String {
    let salary = l
        .salary
        .map(|s| format!("<span class=\"public-salary-item\">{s}</span>"))
        .unwrap_or_default();
    let badges: String = l
        .badges
        .iter()
        .map(|b| format!("<nobr><span class=\"icon\"></span>\n{b}</nobr>\n"))
        .collect();

    format!(
        r#"<li class="list-jobs__item">
  <div class="list-jobs__title">
    <a class="profile" href="/jobs/1-rust-engineer/"><span>{name}</span></a>
    {salary}
  </div>
  <div class="list-jobs__details__info"><a href="/r/1/">{info}</a></div>
  <span class="location-text">Kyiv
Remote</span>
  <div class="list-jobs__description">Build scrapers
 in Rust</div>
  <div class="list-jobs__details">
{badges}  </div>
</li>
"#,
        name = l.name,
        info = l.company_info,
    )
}

pub fn page(listings: &[String]) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Jobs</title></head><body>\
         <ul class=\"list-unstyled\">{}</ul></body></html>",
        listings.concat()
    )
}

/// A page holding `count` well-formed listings with distinct names.
pub fn page_with(count: usize, prefix: &str) -> String {
    let listings: Vec<String> = (0..count)
        .map(|i| {
            let name = format!("{prefix} {i}");
            listing(&Listing {
                name: &name,
                ..Listing::default()
            })
        })
        .collect();
    page(&listings)
}
