//! Logging initialization.

use env_logger::Env;

/// Install `env_logger` as the `log` backend.
///
/// `default_filter` applies when `RUST_LOG` is not set. Calling this more
/// than once is harmless; only the first call installs a logger.
///
/// ```no_run
/// scenewright::logging::init_logging("info,scenewright=debug");
/// log::info!("editor started");
/// ```
pub fn init_logging(default_filter: &str) {
    let env = Env::default().default_filter_or(default_filter);
    if env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init()
        .is_err()
    {
        log::debug!("Logger already initialized");
    }
}
