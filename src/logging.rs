//! Logging configuration for tagsmith
//!
//! Thin helpers over the `tracing` crate. The library itself only emits
//! spans and events; initializing a subscriber is left to the embedding
//! application, with these functions as the convenient default.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log levels supported by tagsmith.
///
/// These map to the tracing level hierarchy: ERROR, WARN, INFO, DEBUG, TRACE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Error logs only
    Error,
    /// Warnings and errors
    Warn,
    /// Normal operational messages
    Info,
    /// Detailed information for troubleshooting
    Debug,
    /// Highly detailed diagnostics, including raw reply text
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Initialize logging with a specific log level.
///
/// Typically called once at application startup. The `TAGSMITH_LOG`
/// environment variable, when set, takes precedence over the level passed
/// here:
///
/// ```bash
/// TAGSMITH_LOG=debug cargo run
/// ```
///
/// # Examples
///
/// ```no_run
/// use tagsmith::logging::{LogLevel, init_logging};
///
/// init_logging(LogLevel::Info);
/// tracing::info!("starting up");
/// ```
pub fn init_logging(level: LogLevel) {
    let env_filter = EnvFilter::try_from_env("TAGSMITH_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("tagsmith={}", level.to_tracing_level())));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter)
        .init();

    tracing::info!("tagsmith logging initialized at level: {:?}", level);
}

/// Initialize logging with a custom environment filter, for more granular
/// control over what gets logged.
///
/// # Examples
///
/// ```no_run
/// use tagsmith::logging::init_logging_with_filter;
///
/// init_logging_with_filter("tagsmith=debug,tagsmith::backend=trace");
/// ```
pub fn init_logging_with_filter(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| {
        tracing::warn!("Invalid filter string: {}, using default (info)", filter);
        EnvFilter::new("tagsmith=info")
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter)
        .init();

    tracing::info!("tagsmith logging initialized with custom filter: {}", filter);
}
