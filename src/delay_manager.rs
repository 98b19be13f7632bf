use std::thread;
use std::time::Duration;
use log::info;

/// Fixed pause between consecutive page fetches. A zero delay returns at once.
pub fn page_delay(delay: Duration) {
    if delay.is_zero() {
        return;
    }
    info!("Waiting {} seconds...", delay.as_secs_f64());
    thread::sleep(delay);
}
