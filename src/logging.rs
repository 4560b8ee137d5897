//! Log setup for the binary. The library only talks to the `log` facade.

use env_logger::{Builder, Env};

/// Variable holding the filter, e.g. `ATSEL_LOG=atsel=debug`.
pub const LOG_ENV: &str = "ATSEL_LOG";

/// Install an `env_logger` writing to stderr. Safe to call more than once.
pub fn initialize() {
    let _ = Builder::from_env(Env::new().filter_or(LOG_ENV, "warn"))
        .format_timestamp_millis()
        .try_init();
}
