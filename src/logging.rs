//! Log output for the command-line tool
//!
//! The library only emits `tracing` events; the binary decides where they go.
//! Events are written to stderr so command output on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Filter directive for the given `-v` count, or `None` to defer to
/// `RUST_LOG`/configuration
#[must_use]
pub const fn verbosity_directive(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("atelier=info"),
        2 => Some("atelier=debug"),
        _ => Some("atelier=trace,reqwest=debug"),
    }
}

/// Pick the active filter
///
/// `-v` wins over `RUST_LOG`, which wins over the configured level; with none
/// of them only warnings are shown.
#[must_use]
pub fn build_filter(verbose: u8, rust_log: Option<&str>, configured: Option<&str>) -> EnvFilter {
    let directive = verbosity_directive(verbose)
        .or(rust_log.filter(|value| !value.trim().is_empty()))
        .or(configured)
        .unwrap_or("warn");
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber
///
/// Calling this twice is harmless; the second call is ignored.
pub fn init(verbose: u8, configured: Option<&str>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = build_filter(verbose, rust_log.as_deref(), configured);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
