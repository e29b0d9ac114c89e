//! Configuration module for http_envelope.
//!
//! This module provides centralized configuration loading from environment variables.
//!
//! # Example
//!
//! ```rust,ignore
//! use http_envelope::config::Config;
//!
//! let config = Config::from_env()?;
//! println!("Upload dir: {:?}", config.capture.upload_dir);
//! ```

mod capture;
mod error;
mod logging;
mod parse;

pub use capture::{CaptureConfig, DEFAULT_MAX_UPLOAD_SIZE};
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig, DEFAULT_FILTER};
pub use parse::{env_bool, env_opt, env_or, env_parse, env_size, parse_size};

/// Complete configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Request capture configuration.
    pub capture: CaptureConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            capture: CaptureConfig::from_env()?,
            logging: LoggingConfig::from_env()?,
        })
    }

    /// Print configuration summary to log.
    pub fn log_summary(&self) {
        use tracing::info;

        info!("Configuration loaded:");
        info!("  Upload dir: {:?}", self.capture.upload_dir);
        info!("  Upload max size: {} bytes", self.capture.max_upload_size);
        info!(
            "  Cookies: {}",
            if self.capture.include_cookies {
                "captured"
            } else {
                "ignored"
            }
        );
        info!("  Server software: {}", self.capture.server_software);
        info!("  Log format: {}", self.logging.format);
    }
}
