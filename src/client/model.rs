//! Draft requests, displayed responses and saved-query snapshots.

use serde::{Deserialize, Serialize};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::error::ClientError;
use crate::proxy::ProxyResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// GET and HEAD drafts keep their body text but never send it.
    pub fn allows_body(&self) -> bool {
        !matches!(self, HttpMethod::Get | HttpMethod::Head)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ClientError::UnknownMethod(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    pub key: String,
    pub value: String,
    pub enabled: bool,
}

impl HeaderEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    pub fn blank() -> Self {
        Self::new("", "")
    }

    pub fn is_content_type(&self) -> bool {
        self.key.trim().eq_ignore_ascii_case("content-type")
    }

    /// Enabled Content-Type header whose value names JSON.
    pub fn declares_json(&self) -> bool {
        self.enabled && self.is_content_type() && self.value.contains("application/json")
    }
}

/// The request currently being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<HeaderEntry>,
    pub body: String,
}

impl Default for DraftRequest {
    fn default() -> Self {
        Self {
            method: HttpMethod::Get,
            url: String::new(),
            headers: vec![HeaderEntry::blank()],
            body: String::new(),
        }
    }
}

impl DraftRequest {
    /// Whether an enabled Content-Type header declares a JSON body.
    pub fn declares_json_body(&self) -> bool {
        self.headers.iter().any(HeaderEntry::declares_json)
    }

    /// The body that would go on the wire, if any.
    pub fn outbound_body(&self) -> Option<&str> {
        if self.body.is_empty() || !self.method.allows_body() {
            None
        } else {
            Some(&self.body)
        }
    }

    /// Enabled, non-blank headers as sent. A later duplicate key overwrites
    /// an earlier one, and `Content-Type: application/json` is added when a
    /// body goes out without any content type.
    pub fn outbound_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        for header in self.headers.iter().filter(|h| h.enabled) {
            if header.key.trim().is_empty() {
                continue;
            }
            headers.insert(header.key.clone(), header.value.clone());
        }

        let has_content_type = headers
            .keys()
            .any(|k| k.trim().eq_ignore_ascii_case("content-type"));
        if self.outbound_body().is_some() && !has_content_type {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }

        headers
    }

    /// Local, advisory check run before anything touches the network.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.url.trim().is_empty() {
            return Err(ClientError::EmptyUrl);
        }

        if self.declares_json_body() && self.outbound_body().is_some() {
            if let Err(e) = serde_json::from_str::<Value>(&self.body) {
                return Err(ClientError::InvalidJsonBody(e.to_string()));
            }
        }

        Ok(())
    }
}

/// A response as held by the client: either relayed from upstream or the
/// synthetic error shape produced by a failed send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseView {
    pub status: u16,
    pub status_text: String,
    /// Relay order; a repeated name keeps its first position and last value.
    pub headers: IndexMap<String, String>,
    pub data: Value,
    /// Milliseconds between dispatch and resolution.
    pub time: u64,
}

impl ResponseView {
    pub fn from_envelope(envelope: ProxyResponse, elapsed_ms: u64) -> Self {
        let mut headers = IndexMap::new();
        for pair in envelope.headers {
            headers.insert(pair.key, pair.value);
        }

        Self {
            status: envelope.status,
            status_text: envelope.status_text,
            headers,
            data: envelope.data,
            time: elapsed_ms,
        }
    }

    pub fn failure(details: impl Into<String>) -> Self {
        Self {
            status: 0,
            status_text: "Error".to_string(),
            headers: IndexMap::new(),
            data: serde_json::json!({
                "error": "Failed to make request",
                "details": details.into(),
            }),
            time: 0,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.status == 0
    }
}

/// Snapshot of a request that completed successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedQuery {
    pub id: String,
    /// Creation time, milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<HeaderEntry>,
    pub body: String,
}

impl SavedQuery {
    pub fn snapshot(draft: &DraftRequest, id: String, timestamp: i64) -> Self {
        Self {
            id,
            timestamp,
            url: draft.url.clone(),
            method: draft.method,
            headers: draft.headers.clone(),
            body: draft.body.clone(),
        }
    }

    pub fn same_target(&self, other: &SavedQuery) -> bool {
        self.url == other.url && self.method == other.method
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::HeaderPair;
    use serde_json::json;

    fn draft(method: HttpMethod, body: &str, headers: Vec<HeaderEntry>) -> DraftRequest {
        DraftRequest {
            method,
            url: "https://api.test/items".to_string(),
            headers,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("patch".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert_eq!("GET".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert!("TRACE".parse::<HttpMethod>().is_err());
        assert_eq!(serde_json::to_value(HttpMethod::Options).unwrap(), json!("OPTIONS"));
    }

    #[test]
    fn test_get_body_never_outbound() {
        let d = draft(HttpMethod::Get, "{\"a\":1}", vec![]);
        assert!(d.outbound_body().is_none());
        assert!(!d.outbound_headers().contains_key("Content-Type"));
    }

    #[test]
    fn test_content_type_synthesized_for_body() {
        let d = draft(HttpMethod::Post, "{}", vec![HeaderEntry::blank()]);
        let headers = d.outbound_headers();
        assert_eq!(headers.get("Content-Type").map(String::as_str), Some("application/json"));
        assert_eq!(headers.len(), 1);
        // The draft itself is untouched.
        assert_eq!(d.headers, vec![HeaderEntry::blank()]);
    }

    #[test]
    fn test_existing_content_type_any_case_wins() {
        let d = draft(
            HttpMethod::Put,
            "a=1",
            vec![HeaderEntry::new("CONTENT-TYPE", "application/x-www-form-urlencoded")],
        );
        let headers = d.outbound_headers();
        assert_eq!(headers.len(), 1);
        assert_eq!(
            headers.get("CONTENT-TYPE").map(String::as_str),
            Some("application/x-www-form-urlencoded")
        );
    }

    #[test]
    fn test_disabled_headers_retained_but_not_sent() {
        let mut disabled = HeaderEntry::new("X-Debug", "1");
        disabled.enabled = false;
        let d = draft(
            HttpMethod::Get,
            "",
            vec![disabled.clone(), HeaderEntry::new("Accept", "*/*"), HeaderEntry::new("accept", "text/plain")],
        );
        let headers = d.outbound_headers();
        assert!(!headers.contains_key("X-Debug"));
        assert_eq!(headers.len(), 2);
        assert_eq!(d.headers[0], disabled);
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let d = draft(
            HttpMethod::Get,
            "",
            vec![HeaderEntry::new("X-Tag", "first"), HeaderEntry::new("X-Tag", "second")],
        );
        assert_eq!(d.outbound_headers().get("X-Tag").map(String::as_str), Some("second"));
    }

    #[test]
    fn test_validate() {
        let mut d = DraftRequest::default();
        assert!(matches!(d.validate(), Err(ClientError::EmptyUrl)));

        d.url = "https://api.test".to_string();
        d.method = HttpMethod::Post;
        d.body = "{not json".to_string();
        // Without a JSON content type the body is not checked.
        assert!(d.validate().is_ok());

        d.headers = vec![HeaderEntry::new("content-type", "application/json; charset=utf-8")];
        assert!(matches!(d.validate(), Err(ClientError::InvalidJsonBody(_))));

        d.method = HttpMethod::Get;
        assert!(d.validate().is_ok());

        d.method = HttpMethod::Post;
        d.body = "{\"ok\":true}".to_string();
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_response_from_envelope_last_header_wins() {
        let envelope = ProxyResponse {
            status: 200,
            status_text: "OK".to_string(),
            headers: vec![
                HeaderPair { key: "x-zeta".into(), value: "z".into() },
                HeaderPair { key: "set-cookie".into(), value: "a=1".into() },
                HeaderPair { key: "content-type".into(), value: "text/plain".into() },
                HeaderPair { key: "set-cookie".into(), value: "b=2".into() },
            ],
            data: json!({ "ok": true }),
        };
        let view = ResponseView::from_envelope(envelope, 42);
        assert_eq!(view.headers.get("set-cookie").map(String::as_str), Some("b=2"));
        // Relay order, not sorted; the repeat keeps its first slot.
        let names: Vec<&str> = view.headers.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["x-zeta", "set-cookie", "content-type"]);
        assert_eq!(view.time, 42);
        assert!(!view.is_failure());
    }

    #[test]
    fn test_failure_shape() {
        let view = ResponseView::failure("connection refused");
        assert_eq!(view.status, 0);
        assert_eq!(view.status_text, "Error");
        assert_eq!(view.time, 0);
        assert_eq!(view.data["details"], "connection refused");
        assert!(view.is_failure());
    }
}
