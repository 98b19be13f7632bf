use std::fs;
use std::path::PathBuf;
use log::{debug, info, warn};
use scraper::Html;
use crate::config::Config;
use crate::delay_manager;
use crate::error::Result;
use crate::extractor::{Extractor, JobRecord};
use crate::fetcher::Fetcher;
use crate::locator::CardLocator;
use crate::record_sink;
use crate::url_builder::{build_search_url, offset_for_page};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Fetching,
    Parsing,
    Delaying,
    Done,
}

#[derive(Debug)]
pub struct RunSummary {
    pub pages_fetched: usize,
    pub pages_failed: usize,
    pub records_saved: usize,
    pub output_path: PathBuf,
}

/// Drives a whole run: every search term in every location, page by page,
/// then one flush to the CSV sink.
pub struct Scraper<'c> {
    config: &'c Config,
    fetcher: Fetcher,
    locator: CardLocator,
    extractor: Extractor,
    state: RunState,
    pages_fetched: usize,
    pages_failed: usize,
}

impl<'c> Scraper<'c> {
    pub fn new(config: &'c Config) -> Result<Self> {
        Ok(Scraper {
            config,
            fetcher: Fetcher::new(config.timeout())?,
            locator: CardLocator::new(&config.fallback_keyword)?,
            extractor: Extractor::new(config.site_url.clone())?,
            state: RunState::Idle,
            pages_fetched: 0,
            pages_failed: 0,
        })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    fn transition(&mut self, next: RunState) {
        debug!("State {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Scrape every (term, location, page) in order and return the records.
    pub fn collect(&mut self) -> Vec<JobRecord> {
        let config = self.config;
        info!("Search terms: {:?}", config.search_terms);
        info!("Locations: {:?}", config.locations);
        info!("Max pages per search: {}", config.max_pages);

        let mut all_jobs = Vec::new();

        for term in &config.search_terms {
            for location in &config.locations {
                info!("--- Searching for '{}' in '{}' ---", term, location);

                for page in 0..config.max_pages {
                    let jobs = self.scrape_page(term, location, offset_for_page(page));
                    info!("Page {}: Found {} jobs", page + 1, jobs.len());
                    all_jobs.extend(jobs);

                    if page + 1 < config.max_pages {
                        self.transition(RunState::Delaying);
                        delay_manager::page_delay(config.request_delay());
                    }
                }
            }
        }

        self.transition(RunState::Done);
        all_jobs
    }

    /// Fetch and parse one results page. A failed fetch yields no records.
    pub fn scrape_page(&mut self, keyword: &str, location: &str, start: u32) -> Vec<JobRecord> {
        let url = build_search_url(&self.config.site_url, keyword, location, start);
        info!("Scraping: {}", url);

        self.transition(RunState::Fetching);
        let html = match self.fetcher.fetch(url.as_str()) {
            Ok(html) => html,
            Err(e) => {
                warn!("Failed to fetch {}: {}", url, e);
                self.pages_failed += 1;
                return Vec::new();
            }
        };
        self.pages_fetched += 1;
        self.dump_html(&html);

        self.transition(RunState::Parsing);
        self.parse_page(&html)
    }

    /// Locate cards in `html` and extract a record from each one that has a title.
    pub fn parse_page(&self, html: &str) -> Vec<JobRecord> {
        let document = Html::parse_document(html);
        let located = self.locator.locate(&document);

        let mut jobs = Vec::with_capacity(located.len());
        for (i, card) in located.cards.iter().enumerate() {
            match self.extractor.extract(*card) {
                Some(job) => jobs.push(job),
                None => debug!("Failed to extract data from job card {}", i + 1),
            }
        }
        jobs
    }

    fn dump_html(&self, html: &str) {
        if let Some(path) = &self.config.debug_html {
            match fs::write(path, html) {
                Ok(()) => debug!("Saved page HTML to {}", path.display()),
                Err(e) => warn!("Could not save page HTML to {}: {}", path.display(), e),
            }
        }
    }

    /// Collect everything, then append it to the configured output file.
    pub fn run(&mut self) -> Result<RunSummary> {
        info!("Starting job scraper...");
        let jobs = self.collect();
        let output_path = self.config.output_path();

        let records_saved = record_sink::save_records(&jobs, &output_path)?;
        if records_saved > 0 {
            info!("Scraping completed! Total jobs found: {}", records_saved);
            info!("Results saved to: {}", output_path.display());
        } else {
            warn!("No jobs were found. Check your search terms or try different locations.");
        }

        Ok(RunSummary {
            pages_fetched: self.pages_fetched,
            pages_failed: self.pages_failed,
            records_saved,
            output_path,
        })
    }
}
