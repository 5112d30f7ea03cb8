//! Query-string codec for provider request parameters.
//!
//! Converts between a key/value map and its flattened `key=value&key=value`
//! textual form, plus a standalone percent-encoding helper.

use std::collections::HashMap;

use url::form_urlencoded;

/// Parameter map exchanged with contact providers.
///
/// A `None` value records a decoded segment that carried no `=` separator;
/// maps built by callers normally hold `Some` values throughout.
pub type QueryMap = HashMap<String, Option<String>>;

/// Flattens a parameter map into `key=value` pairs joined with `&`.
///
/// Values are **not** percent-encoded here. Callers that put reserved
/// characters (`&`, `=`, spaces) into values must pre-encode them with
/// [`percent_encode`]; the two operations are deliberately independent.
/// A `None` value renders as an empty value (`key=`).
pub fn encode_query(params: &QueryMap) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{key}={}", value.as_deref().unwrap_or("")))
        .collect::<Vec<_>>()
        .join("&")
}

/// Parses a query string back into a [`QueryMap`].
///
/// Segments are split on `&`, then on the first `=`. When the same key
/// repeats, the last value wins. A segment without `=` maps the whole
/// segment to `None` rather than failing.
pub fn decode_query(query: &str) -> QueryMap {
    let mut params = QueryMap::new();
    for segment in query.split('&') {
        if segment.is_empty() {
            continue;
        }
        match segment.split_once('=') {
            Some((key, value)) => {
                params.insert(key.to_string(), Some(value.to_string()));
            }
            None => {
                params.insert(segment.to_string(), None);
            }
        }
    }
    params
}

/// Percent-encodes a string with CGI escaping semantics.
///
/// Unreserved characters pass through and spaces become `+`, matching the
/// `application/x-www-form-urlencoded` serialization providers expect in
/// pre-encoded query values. Pure and total.
pub fn percent_encode(input: &str) -> String {
    form_urlencoded::byte_serialize(input.as_bytes()).collect()
}
