//! Response building utilities for proxy responses.
//!
//! Reshapes a raw upstream response into the `ProxyResponse` envelope:
//! ordered header pairs, reason phrase, and a body decoded according to the
//! declared content type.

use super::types::*;
use crate::shared::status_text;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use serde_json::Value;

/// Whether a Content-Type value declares a JSON body.
pub fn is_json_content(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.contains("application/json"))
        .unwrap_or(false)
}

/// Decodes a body according to its content type.
///
/// JSON bodies that fail to decode fall back to raw text instead of failing
/// the relay. Non-UTF-8 text is decoded lossily.
pub fn parse_body(content_type: Option<&str>, body: &[u8]) -> Value {
    if is_json_content(content_type) {
        match serde_json::from_slice(body) {
            Ok(value) => return value,
            Err(e) => {
                tracing::debug!("Upstream declared JSON but body did not parse: {}", e);
            }
        }
    }

    Value::String(String::from_utf8_lossy(body).into_owned())
}

/// Lists headers in the order the upstream map enumerates them, keeping
/// repeated names as separate pairs.
pub fn header_pairs(headers: &HeaderMap) -> Vec<HeaderPair> {
    headers
        .iter()
        .map(|(k, v)| HeaderPair {
            key: k.to_string(),
            value: match v.to_str() {
                Ok(s) => s.to_string(),
                Err(_) => String::from_utf8_lossy(v.as_bytes()).into_owned(),
            },
        })
        .collect()
}

/// Builds a `ProxyResponse` from raw response data.
pub fn build_response(status: u16, headers: &HeaderMap, body: &[u8]) -> ProxyResponse {
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());

    ProxyResponse {
        status,
        status_text: status_text(status),
        headers: header_pairs(headers),
        data: parse_body(content_type, body),
    }
}
