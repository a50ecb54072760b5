//! Logging setup for the `image_processor` binary

pub use tracing::{debug, error, info, trace, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
};

/// Install the global subscriber.
///
/// Verbosity comes from `RUST_LOG` (default `info`). Output goes to stderr
/// so that stdout carries only the one-line failure message.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let is_debug = span_close_events(env_filter.max_level_hint());

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(fmt::time::uptime())
        .with_span_events(if is_debug {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// True when span-close events are logged: debug level or finer.
fn span_close_events(max_level: Option<LevelFilter>) -> bool {
    max_level.is_some_and(|level| level >= LevelFilter::DEBUG)
}
