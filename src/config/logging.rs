//! Logging configuration.

use std::fmt;
use std::str::FromStr;

use super::parse::{env_opt, env_or};
use super::ConfigError;

/// Default filter when neither LOG_LEVEL nor RUST_LOG is set.
pub const DEFAULT_FILTER: &str = "http_envelope=info";

/// Output format of log lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable tracing_subscriber fmt output.
    Text,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" | "pretty" => Ok(LogFormat::Text),
            other => Err(format!("expected json or text, got '{}'", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Json => f.write_str("json"),
            LogFormat::Text => f.write_str("text"),
        }
    }
}

/// Logging configuration loaded from environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level filter (from LOG_LEVEL or RUST_LOG).
    pub filter: String,
    /// Service name for structured logging.
    pub service_name: String,
    /// Output format (LOG_FORMAT).
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            service_name: "http_envelope".to_string(),
            format: LogFormat::Json,
        }
    }
}

impl LoggingConfig {
    /// Load configuration from environment variables.
    ///
    /// Priority: LOG_LEVEL > RUST_LOG > default
    ///
    /// LOG_LEVEL accepts simple values: trace, debug, info, warn, error
    /// RUST_LOG accepts full tracing filter syntax: http_envelope=debug,multer=warn
    pub fn from_env() -> Result<Self, ConfigError> {
        let format = match env_opt("LOG_FORMAT") {
            Some(value) => value.parse().map_err(|message| ConfigError::Invalid {
                key: "LOG_FORMAT".into(),
                message,
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            filter: Self::resolve_log_filter(),
            service_name: env_or("SERVICE_NAME", "http_envelope"),
            format,
        })
    }

    /// Resolve log filter from environment.
    fn resolve_log_filter() -> String {
        if let Some(level) = env_opt("LOG_LEVEL") {
            let level = level.to_lowercase();
            match level.as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => {
                    return format!("http_envelope={}", level);
                }
                _ => {
                    // Subscriber is not installed yet
                    eprintln!(
                        "Warning: Invalid LOG_LEVEL '{}', expected: trace, debug, info, warn, error",
                        level
                    );
                }
            }
        }

        if let Some(filter) = env_opt("RUST_LOG") {
            return filter;
        }

        DEFAULT_FILTER.to_string()
    }
}
