//! Outbound execution of one relayed HTTP request.
//!
//! The relay performs exactly one call per request: no retries, no timeout
//! beyond the transport defaults, and upstream error statuses are returned
//! as data rather than treated as failures.

use super::response_builder::build_response;
use super::types::*;
use crate::error::AppError;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client, Method,
};
use std::str::FromStr;

const DEFAULT_METHOD: &str = "GET";

/// Validated form of a `ProxyRequest`, ready to hand to the HTTP client.
#[derive(Debug)]
struct OutboundRequest {
    method: Method,
    url: url::Url,
    headers: HeaderMap,
    body: Option<String>,
}

impl OutboundRequest {
    fn from_proxy_request(request: ProxyRequest) -> Result<Self, AppError> {
        let url = match request.url {
            Some(url) if !url.is_empty() => url,
            _ => return Err(AppError::MissingUrl),
        };

        let url = url::Url::parse(&url)
            .map_err(|e| AppError::InvalidProxyInput(format!("Invalid URL: {}", e)))?;

        let method_name = request
            .method
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_METHOD.to_string())
            .to_uppercase();
        let method = Method::from_str(&method_name)
            .map_err(|_| AppError::InvalidProxyInput(format!("Invalid method: {}", method_name)))?;

        let mut headers = HeaderMap::new();
        for (key, value) in request.headers {
            let name = HeaderName::from_str(&key)
                .map_err(|_| AppError::InvalidProxyInput(format!("Invalid header name: {}", key)))?;
            let value = HeaderValue::from_str(&value).map_err(|_| {
                AppError::InvalidProxyInput(format!("Invalid value for header {}", key))
            })?;
            headers.insert(name, value);
        }

        let body = request
            .body
            .filter(|b| !b.is_empty() && method_allows_body(&method));

        Ok(Self {
            method,
            url,
            headers,
            body,
        })
    }
}

/// GET and HEAD requests never carry a body.
pub fn method_allows_body(method: &Method) -> bool {
    *method != Method::GET && *method != Method::HEAD
}

/// Execute a relayed request and normalize whatever the upstream returned.
pub async fn execute_request(
    client: &Client,
    request: ProxyRequest,
) -> Result<ProxyResponse, AppError> {
    let outbound = OutboundRequest::from_proxy_request(request)?;

    tracing::debug!("Making {} request to {}", outbound.method, outbound.url);

    let mut builder = client
        .request(outbound.method, outbound.url)
        .headers(outbound.headers);
    if let Some(body) = outbound.body {
        builder = builder.body(body);
    }

    let response = builder.send().await?;

    let status = response.status().as_u16();
    let headers = response.headers().clone();
    let body = response.bytes().await?;

    Ok(build_response(status, &headers, &body))
}
