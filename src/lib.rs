pub mod config;
pub mod error;
pub mod logger;
pub mod delay_manager;
pub mod matcher;
pub mod url_builder;
pub mod fetcher;
pub mod locator;
pub mod extractor;
pub mod record_sink;
pub mod scraper;

// Exporting types for convenience
pub use config::Config;
pub use error::{Result, ScrapeError};
pub use extractor::{Extractor, JobRecord};
pub use fetcher::Fetcher;
pub use locator::CardLocator;
pub use self::scraper::{RunState, RunSummary, Scraper};
