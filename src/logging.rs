//! Logging setup.
//!
//! Diagnostics go through `tracing`. The filter is resolved in this order:
//!
//! 1. **`SPARK_REMOUNT_LOG`** - crate-specific override
//! 2. **`RUST_LOG`** - standard tracing variable
//! 3. **Default** - `warn` globally, `info` for this crate

use std::env;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SPARK_REMOUNT_LOG";
const DEFAULT_FILTER: &str = "warn,spark_remount=info";

static INIT: Once = Once::new();

/// Install a stdout subscriber.
///
/// Only the first call does any work; later calls return `Ok(())`. The first
/// call fails if the filter does not parse or another subscriber was
/// installed elsewhere.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut result = Ok(());
    INIT.call_once(|| {
        result = create_filter()
            .and_then(|filter| tracing_subscriber::fmt().with_env_filter(filter).try_init());
    });
    result
}

/// Initialize logging for tests, ignoring an already installed subscriber.
pub fn test() {
    let _ = init();
}

fn create_filter() -> Result<EnvFilter, Box<dyn std::error::Error + Send + Sync>> {
    let directives = env::var(LOG_ENV)
        .or_else(|_| env::var("RUST_LOG"))
        .unwrap_or_else(|_| DEFAULT_FILTER.to_string());
    Ok(EnvFilter::try_new(directives)?)
}
