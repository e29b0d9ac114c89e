//! Environment variable parsing utilities.

use std::str::FromStr;

use super::ConfigError;

/// Get environment variable with default value.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get optional environment variable (None if empty or missing).
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

/// Parse environment variable as boolean.
/// Treats "1", "true", "on" (case-insensitive) as true and "0", "false",
/// "off" as false. Anything else keeps the default.
pub fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => parse_bool(&v).unwrap_or(default),
        Err(_) => default,
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "on" => Some(true),
        "0" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Parse environment variable with type conversion.
pub fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(v) if !v.is_empty() => v.parse().map_err(|e: T::Err| ConfigError::Parse {
            key: key.into(),
            value: v,
            error: e.to_string(),
        }),
        _ => Ok(default),
    }
}

/// Parse a byte size (e.g., "512", "64k", "10m", "1g").
/// Suffixes are binary multiples and case-insensitive.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim().to_lowercase();

    let (num_str, multiplier) = match s.chars().last() {
        Some('k') => (&s[..s.len() - 1], 1u64 << 10),
        Some('m') => (&s[..s.len() - 1], 1u64 << 20),
        Some('g') => (&s[..s.len() - 1], 1u64 << 30),
        _ => (s.as_str(), 1),
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid size: {}", s))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| format!("size overflows: {}", s))
}

/// Parse environment variable as byte size.
pub fn env_size(key: &str, default: u64) -> Result<u64, ConfigError> {
    match env_opt(key) {
        Some(value) => parse_size(&value).map_err(|e| ConfigError::Parse {
            key: key.into(),
            value,
            error: e,
        }),
        None => Ok(default),
    }
}
