//! Global logger setup for the demo binary and tests.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// `RUST_LOG` wins when set. Otherwise `verbose` raises this crate to debug
/// level while dependencies stay at info.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // Only fails when a logger is already installed, e.g. by an earlier test.
    if builder.try_init().is_err() {
        log::debug!("logger already initialised");
    }
}

fn default_filter(verbose: bool) -> String {
    if verbose {
        format!(
            "{},{}={}",
            LevelFilter::Info,
            env!("CARGO_CRATE_NAME"),
            LevelFilter::Debug
        )
    } else {
        LevelFilter::Info.to_string()
    }
}
