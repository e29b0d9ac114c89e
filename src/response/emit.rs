//! Writing a response to standard output.

use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use crate::core::Result;

/// Serialize a response for output.
///
/// With `as_json` the value is JSON-encoded. Without it a JSON string is
/// emitted as its raw text and anything else is still JSON-encoded.
pub fn render<T>(response: &T, as_json: bool) -> Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    if as_json {
        return Ok(serde_json::to_vec(response)?);
    }

    match serde_json::to_value(response)? {
        Value::String(text) => Ok(text.into_bytes()),
        other => Ok(serde_json::to_vec(&other)?),
    }
}

/// Write the rendered response to stdout and exit the process with status 0.
///
/// Nothing after this call runs. Encoding or write failures are logged and
/// the process still exits. Destructors do not run either, so drop the
/// request [`Context`](crate::core::Context) or call its `cleanup` first.
pub fn finish<T>(response: &T, as_json: bool) -> !
where
    T: Serialize + ?Sized,
{
    match render(response, as_json) {
        Ok(bytes) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout.write_all(&bytes).and_then(|()| stdout.flush()) {
                tracing::error!(error = %e, "failed to write response");
            }
        }
        Err(e) => tracing::error!(error = %e, "failed to render response"),
    }

    std::process::exit(0)
}
