//! Diagnostic logging to stderr.
//!
//! Engine output shown to the user goes through the downloader sinks, not here.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Quiet unless RUST_LOG asks for more; the terminal belongs to the prompts.
const DEFAULT_FILTER: &str = "warn";

pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
}
