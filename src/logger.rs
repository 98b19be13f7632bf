use std::io::Write;
use chrono::Local;
use env_logger::Builder;
use log::LevelFilter;

/// Crates that get chatty at debug level while parsing and fetching.
const QUIET_TARGETS: [&str; 4] = ["html5ever", "selectors", "hyper", "reqwest"];

/// Timestamped logging to stderr at `info`; `RUST_LOG` overrides any level set here.
pub fn init() {
    let mut builder = Builder::new();
    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info);

    for target in QUIET_TARGETS {
        builder.filter(Some(target), LevelFilter::Warn);
    }

    if builder.parse_default_env().try_init().is_err() {
        log::debug!("Logger already initialized.");
    }
}
