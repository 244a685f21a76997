//! Logging initialization via tracing.
//!
//! The engine emits its per-source and per-page trace lines, skip warnings,
//! and the final summary through `tracing` macros; these initializers pick
//! how those events are rendered. Both write to stderr so stdout stays
//! clean for the selector list.

use tracing_subscriber::EnvFilter;

/// Structured JSON logging. Call once at the beginning of the application's
/// runtime.
///
/// # Environment Variables
/// - `RUST_LOG`: Controls log filtering (e.g., `RUST_LOG=deadstyle_core=debug`)
pub fn init_structured_logging() {
    tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// Human-readable progress logging for CLI runs, defaulting to `info` when
/// `RUST_LOG` is unset.
pub fn init_cli_logging() {
    tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
