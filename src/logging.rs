//! Diagnostic logging.
//!
//! User-facing output goes through the reporters; this is only for
//! `-v`/`HOOKGUARD_LOG` debugging and lands on stderr.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "HOOKGUARD_LOG";

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "hookguard=debug" } else { "warn" }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are no-ops.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init();
}
