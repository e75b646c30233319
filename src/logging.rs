//! Structured logging setup.
//!
//! Logs go to **stderr** so stdout stays free for the host. Filtering follows
//! `RUST_LOG`; without it the provider logs at `info`.
//!
//! ```bash
//! # Trace every request the queue dispatches
//! RUST_LOG=aznamingtool_provider::client=debug ./terraform-provider-aznamingtool
//! ```
//!
//! Credentials never reach the logs: the client logs method, URL and status
//! only, and the config types redact secrets in their `Debug` output.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber with the default filter.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging() {
    init_logging_with_default(DEFAULT_FILTER);
}

/// Install the global subscriber, falling back to `default_filter` when
/// `RUST_LOG` is not set.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging_with_default(default_filter: &str) {
    tracing_subscriber::registry()
        .with(env_filter(default_filter))
        .with(stderr_layer())
        .init();
}

/// Like [`init_logging`], but returns `false` instead of panicking when a
/// subscriber is already installed.
pub fn try_init_logging() -> bool {
    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_FILTER))
        .with(stderr_layer())
        .try_init()
        .is_ok()
}

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

fn stderr_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}
