use log::debug;
use scraper::ElementRef;
use url::Url;
use crate::error::Result;
use crate::matcher::{self, element_text, first_text, Matcher};

/// Longest summary kept, in characters, before the ellipsis is added.
pub const SUMMARY_LIMIT: usize = 200;
const ELLIPSIS: &str = "...";

/// One job posting pulled out of a card. Only the title is mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub summary: Option<String>,
    pub url: Option<String>,
}

pub struct Extractor {
    site: Url,
    title: Vec<Matcher>,
    company: Vec<Matcher>,
    location: Vec<Matcher>,
    salary: Vec<Matcher>,
    summary: Vec<Matcher>,
    link: Matcher,
}

impl Extractor {
    pub fn new(site: Url) -> Result<Self> {
        Ok(Extractor {
            site,
            title: matcher::chain(&[
                r#"h2[data-testid="job-title"]"#,
                "h2.jobTitle",
                r#"a[data-testid="job-title"]"#,
                "span[title]",
            ])?,
            company: matcher::chain(&[
                r#"span[data-testid="company-name"]"#,
                "span.companyName",
                r#"a[data-testid="company-name"]"#,
            ])?,
            location: matcher::chain(&[
                r#"div[data-testid="job-location"]"#,
                "div.companyLocation",
                "span.locationsContainer",
            ])?,
            salary: matcher::chain(&[
                "span.salary-snippet",
                r#"div[data-testid="salary-snippet"]"#,
                r#"span[data-testid="salary-snippet"]"#,
            ])?,
            summary: matcher::chain(&[
                "div.job-snippet",
                r#"div[data-testid="job-snippet"]"#,
                "div.summary",
            ])?,
            link: Matcher::new("a")?,
        })
    }

    /// Build a record from one card, or `None` when no title can be found.
    pub fn extract(&self, card: ElementRef<'_>) -> Option<JobRecord> {
        let (title, url) = match self.extract_title(card) {
            Some(found) => found,
            None => {
                debug!("Skipping job card - no title found");
                return None;
            }
        };

        Some(JobRecord {
            title,
            url,
            company: first_text(&self.company, card).map(|(t, _)| t),
            location: first_text(&self.location, card).map(|(t, _)| t),
            salary: first_text(&self.salary, card).map(|(t, _)| t),
            summary: first_text(&self.summary, card).map(|(t, _)| truncate_summary(&t)),
        })
    }

    /// Title and detail link. A heading that wraps a link contributes the
    /// link's text and `href`; anything else contributes its own.
    pub fn extract_title(&self, card: ElementRef<'_>) -> Option<(String, Option<String>)> {
        for m in &self.title {
            let Some(element) = m.find(card) else {
                continue;
            };

            let source = if element.value().name() == "h2" {
                self.link.find(element).unwrap_or(element)
            } else {
                element
            };
            let text = element_text(source).or_else(|| element_text(element));

            if let Some(title) = text {
                debug!("Found title using: {}", m.css());
                let url = source.value().attr("href").and_then(|href| self.resolve(href));
                return Some((title, url));
            }
        }
        None
    }

    fn resolve(&self, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }
        self.site.join(href).ok().map(|u| u.to_string())
    }
}

/// Cut to `SUMMARY_LIMIT` characters and append `...` when longer.
pub fn truncate_summary(text: &str) -> String {
    match text.char_indices().nth(SUMMARY_LIMIT) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}
