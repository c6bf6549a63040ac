//! Tracing subscriber setup.
//!
//! Logs go to stderr so they never mix with command output on stdout.
//! `RUST_LOG` wins over the `--verbose` flag when both are present.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.  Safe to call more than once; later
/// calls are ignored.
pub fn init(verbose: bool) {
    let default_level = if verbose { "securepass=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
