//! JSON text helpers.

use serde::Serialize;
use serde_json::Value;

use crate::core::Result;

/// Encode a value as compact JSON text.
#[inline]
pub fn encode<T>(value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    Ok(serde_json::to_string(value)?)
}

/// Decode JSON text. Malformed input yields `None`.
#[inline]
pub fn decode(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}
