//! Query string, cookie and url-encoded form parsing.

use std::borrow::Cow;

use super::ParamList;

/// Percent decode a form component. `+` is decoded to a space.
#[inline]
pub fn form_decode(s: &str) -> String {
    let s: Cow<'_, str> = if s.contains('+') {
        Cow::Owned(s.replace('+', " "))
    } else {
        Cow::Borrowed(s)
    };
    percent_decode(&s)
}

/// Percent decode without `+` handling (cookie values).
#[inline]
pub fn percent_decode(s: &str) -> String {
    if s.contains('%') {
        percent_encoding::percent_decode_str(s)
            .decode_utf8_lossy()
            .into_owned()
    } else {
        s.to_string()
    }
}

/// Parse a query string into key-value pairs.
///
/// Pairs without a key are skipped; a bare key maps to an empty value.
#[inline]
pub fn parse_query_string(query: &str) -> ParamList {
    let pair_count = query.matches('&').count() + 1;
    let mut params = Vec::with_capacity(pair_count.min(16));

    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }

        let (key, value) = match pair.find('=') {
            Some(pos) => (&pair[..pos], &pair[pos + 1..]),
            None => (pair, ""),
        };

        if !key.is_empty() {
            params.push((form_decode(key), form_decode(value)));
        }
    }

    params
}

/// Parse an `application/x-www-form-urlencoded` body.
#[inline]
pub fn parse_urlencoded(body: &[u8]) -> ParamList {
    parse_query_string(&String::from_utf8_lossy(body))
}

/// Parse a Cookie header into name-value pairs.
#[inline]
pub fn parse_cookies(cookie_header: &str) -> ParamList {
    let cookie_count = cookie_header.matches(';').count() + 1;
    let mut cookies = Vec::with_capacity(cookie_count.min(16));

    for cookie in cookie_header.split(';') {
        let cookie = cookie.trim();
        if cookie.is_empty() {
            continue;
        }

        let (name, value) = match cookie.find('=') {
            Some(pos) => (cookie[..pos].trim(), cookie[pos + 1..].trim()),
            None => continue,
        };

        if !name.is_empty() {
            cookies.push((name.to_string(), percent_decode(value)));
        }
    }

    cookies
}
