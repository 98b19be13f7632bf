use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use log::info;
use serde::Deserialize;
use url::Url;
use crate::error::{Result, ScrapeError};

const DEFAULT_SITE: &str = "https://ca.indeed.com";

/// Everything a run needs. Built once at startup and handed to the
/// components by reference.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub search_terms: Vec<String>,
    pub locations: Vec<String>,
    pub max_pages: u32,
    pub request_delay_secs: u64,
    pub timeout_secs: u64,
    /// Site root. Search URLs and posting links are resolved against it.
    pub site_url: Url,
    pub output_dir: PathBuf,
    pub output_file: String,
    /// Keyword for the last-resort card strategy.
    pub fallback_keyword: String,
    /// When set, every fetched page is dumped here for inspection.
    pub debug_html: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let search_terms = [
            "Software Engineer",
            "Data Scientist",
            "Web Developer",
            "Internship",
            "Cashier",
            "Sales consultent",
            "Customer Service Representative",
            "Project Manager",
            "Marketing Specialist",
            "Tech Intern",
            "Co-op Student",
        ];

        Config {
            search_terms: search_terms.iter().map(|s| s.to_string()).collect(),
            locations: vec!["OTTAWA".to_string()],
            max_pages: 2,
            request_delay_secs: 2,
            timeout_secs: 10,
            site_url: Url::parse(DEFAULT_SITE).expect("default site URL is valid"),
            output_dir: PathBuf::from("data"),
            output_file: "job.csv".to_string(),
            fallback_keyword: "engineer".to_string(),
            debug_html: None,
        }
    }
}

impl Config {
    /// Load a JSON config file. Keys left out keep their default values;
    /// unknown keys are rejected.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ScrapeError::config(format!("cannot read {}: {}", path.display(), e)))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| ScrapeError::config(format!("cannot parse {}: {}", path.display(), e)))?;
        config.validate()?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.search_terms.is_empty() {
            return Err(ScrapeError::config("search_terms is empty"));
        }
        if self.locations.is_empty() {
            return Err(ScrapeError::config("locations is empty"));
        }
        if self.max_pages == 0 {
            return Err(ScrapeError::config("max_pages must be at least 1"));
        }
        if self.output_file.trim().is_empty() {
            return Err(ScrapeError::config("output_file is empty"));
        }
        Ok(())
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_secs(self.request_delay_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
