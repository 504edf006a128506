//! Client side of the two relay endpoints.

use serde::Deserialize;
use serde_json::json;
use std::future::Future;
use std::pin::Pin;

use super::ClientError;
use crate::proxy::{ProxyRequest, ProxyResponse};

pub type RelayFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ClientError>> + Send + 'a>>;

/// Transport between the client state and the relay server.
pub trait RelayClient: Send + Sync {
    /// Posts to `/api/proxy`. A non-success status from the relay itself is
    /// an error; upstream statuses arrive inside the envelope.
    fn relay(&self, request: ProxyRequest) -> RelayFuture<'_, ProxyResponse>;

    /// Posts to `/api/generate-json` and resolves to the generated JSON text.
    fn generate_json(&self, description: String) -> RelayFuture<'_, String>;
}

#[derive(Debug, Deserialize)]
struct GenerateReply {
    json: Option<String>,
    error: Option<String>,
}

/// `RelayClient` that talks to a running relay over HTTP.
#[derive(Clone)]
pub struct HttpRelayClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_proxy(&self, request: ProxyRequest) -> Result<ProxyResponse, ClientError> {
        let response = self
            .client
            .post(format!("{}/api/proxy", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::RelayStatus(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }

    async fn post_generate(&self, description: String) -> Result<String, ClientError> {
        let response = self
            .client
            .post(format!("{}/api/generate-json", self.base_url))
            .json(&json!({ "description": description }))
            .send()
            .await?;

        let ok = response.status().is_success();
        let reply: GenerateReply = response.json().await?;

        if !ok {
            return Err(ClientError::Generation(
                reply
                    .error
                    .unwrap_or_else(|| "Failed to generate JSON".to_string()),
            ));
        }

        reply
            .json
            .ok_or_else(|| ClientError::Generation("No JSON was generated".to_string()))
    }
}

impl RelayClient for HttpRelayClient {
    fn relay(&self, request: ProxyRequest) -> RelayFuture<'_, ProxyResponse> {
        Box::pin(self.post_proxy(request))
    }

    fn generate_json(&self, description: String) -> RelayFuture<'_, String> {
        Box::pin(self.post_generate(description))
    }
}
