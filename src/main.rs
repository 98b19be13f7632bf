use std::env;
use std::error::Error;
use log::{error, info};
use job_scraper_lib::{logger, Config, Scraper};

fn main() -> Result<(), Box<dyn Error>> {
    logger::init();

    // Optional first argument: path to a JSON config file.
    let config = match env::args().nth(1) {
        Some(path) => Config::load(&path)?,
        None => {
            info!("No config file given, using built-in defaults.");
            Config::default()
        }
    };

    let mut scraper = Scraper::new(&config)?;
    let summary = match scraper.run() {
        Ok(summary) => summary,
        Err(e) => {
            error!("Could not save results to {}: {}", config.output_path().display(), e);
            return Err(e.into());
        }
    };

    info!(
        "Done. {} pages fetched, {} failed, {} jobs saved to {}",
        summary.pages_fetched,
        summary.pages_failed,
        summary.records_saved,
        summary.output_path.display()
    );
    Ok(())
}
