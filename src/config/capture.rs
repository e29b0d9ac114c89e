//! Request capture configuration.

use std::path::PathBuf;

use super::parse::{env_bool, env_opt, env_size};
use super::ConfigError;

/// Default maximum size of a single uploaded file (10 MiB).
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 10 * 1024 * 1024;

/// Capture configuration loaded from environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Directory uploaded files are stored in (UPLOAD_DIR).
    pub upload_dir: PathBuf,
    /// Per-file size limit in bytes (UPLOAD_MAX_SIZE).
    pub max_upload_size: u64,
    /// Merge cookies into captured data (CAPTURE_COOKIES).
    pub include_cookies: bool,
    /// SERVER_SOFTWARE server variable.
    pub server_software: String,
}

impl CaptureConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let upload_dir = env_opt("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.upload_dir);

        let max_upload_size = env_size("UPLOAD_MAX_SIZE", defaults.max_upload_size)?;
        if max_upload_size == 0 {
            return Err(ConfigError::Invalid {
                key: "UPLOAD_MAX_SIZE".into(),
                message: "must be greater than zero".into(),
            });
        }

        Ok(Self {
            upload_dir,
            max_upload_size,
            include_cookies: env_bool("CAPTURE_COOKIES", defaults.include_cookies),
            server_software: env_opt("SERVER_SOFTWARE").unwrap_or(defaults.server_software),
        })
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            upload_dir: std::env::temp_dir(),
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
            include_cookies: true,
            server_software: format!("http_envelope/{}", crate::PKG_VERSION),
        }
    }
}
