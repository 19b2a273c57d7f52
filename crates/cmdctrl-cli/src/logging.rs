//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never mix with what the server prints on
//! stdout. The default level is `warn`, which keeps normal lifecycle runs
//! silent; `RUST_LOG` or `--verbose` raises it.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // An embedding server may have installed its own subscriber already.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
