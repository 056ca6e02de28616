//! Tracing subscriber setup
//!
//! Logs go to stderr and `RUST_LOG` wins over the configured level. Message
//! text never reaches the logs; moderation events carry the field label and
//! match count only.

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Build the filter from `RUST_LOG`, falling back to the configured level
pub fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Returns false when one is already set,
/// which happens when tests initialize logging more than once.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let filter = build_env_filter(config);
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_current_span(true),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_ids(false),
            )
            .try_init()
    };

    result.is_ok()
}
