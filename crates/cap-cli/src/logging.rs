//! Tracing setup.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `capslot=debug`).
const LOG_ENV: &str = "CAPSLOT_LOG";

/// Install a stderr subscriber filtered by `CAPSLOT_LOG` (default `warn`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
