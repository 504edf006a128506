use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Incoming relay request from the client.
///
/// Every field is optional on the wire so that a missing URL can be answered
/// with the endpoint's own 400 payload instead of a decoding failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProxyRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Treats an explicit `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ProxyRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            method: Some(method.into()),
            ..Default::default()
        }
    }
}

/// One upstream response header. Duplicates are kept as separate entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderPair {
    pub key: String,
    pub value: String,
}

/// Normalized envelope returned by `/api/proxy`, whatever the upstream
/// status was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub status_text: String,
    #[serde(default)]
    pub headers: Vec<HeaderPair>,
    /// Decoded JSON when the upstream declared JSON and it parsed, otherwise
    /// the body as a JSON string.
    #[serde(default)]
    pub data: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_optional_fields_decode_as_absent() {
        let request: ProxyRequest = serde_json::from_str(
            r#"{"url":"https://a.test","method":null,"headers":null,"body":null}"#,
        )
        .unwrap();
        assert_eq!(request.url.as_deref(), Some("https://a.test"));
        assert!(request.method.is_none());
        assert!(request.headers.is_empty());
        assert!(request.body.is_none());

        let request: ProxyRequest = serde_json::from_str(r#"{"url":"https://a.test"}"#).unwrap();
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_headers_must_still_be_a_map() {
        assert!(serde_json::from_str::<ProxyRequest>(r#"{"url":"u","headers":[1]}"#).is_err());
    }
}
