//! Structured logging setup and span helpers
//!
//! Logs are emitted through `tracing`; the subscriber writes JSON lines by
//! default and human-readable output when `pretty` is selected.

use crate::config::ServiceConfig;
use tracing::{span, Level, Span};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("pretty") {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `movie_catalog_api=debug,info`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

impl From<&ServiceConfig> for LogConfig {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            level: config.log_level.clone(),
            format: LogFormat::parse(&config.log_format),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ObservabilityError {
    #[error("Failed to initialize log subscriber: {0}")]
    SubscriberInit(String),
}

/// Install the global log subscriber
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<(), ObservabilityError> {
    let env_filter =
        EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_target(true).with_line_number(true))
            .try_init(),
    };

    result.map_err(|e| ObservabilityError::SubscriberInit(e.to_string()))
}

/// Span for a catalog store operation
pub fn db_span(operation: &str) -> Span {
    span!(
        Level::DEBUG,
        "db.query",
        db.system = "postgresql",
        db.operation = %operation
    )
}

/// Span for an outbound HTTP call
pub fn external_api_span(method: &str, url: &str, service: &str) -> Span {
    span!(
        Level::INFO,
        "http.client",
        http.method = %method,
        http.url = %url,
        peer.service = %service
    )
}
