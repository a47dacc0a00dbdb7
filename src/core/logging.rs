//! Diagnostic logging to stderr.
//!
//! Logging is for diagnostics only; user-facing output goes through
//! [`crate::render`]. The default level is `warn` so normal runs stay quiet.

use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter (tracing `EnvFilter` syntax).
pub const LOG_ENV: &str = "BEDROCK_SETUP_LOG";

/// Initialize the global tracing subscriber.
///
/// `verbose` (from `--verbose` or a truthy `DEBUG`) forces `debug` level;
/// otherwise `BEDROCK_SETUP_LOG` is honored, falling back to `warn`.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
