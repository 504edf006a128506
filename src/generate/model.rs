//! Language-model client abstraction and the Ollama implementation.

use crate::config::GeneratorConfig;
use base64::Engine;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Ollama API error: {status} {body}")]
    Upstream { status: u16, body: String },

    #[error("Unexpected model server reply: {0}")]
    MalformedReply(String),

    #[error("Invalid request body: {0}")]
    InvalidInput(String),
}

pub type ModelFuture<'a> = Pin<Box<dyn Future<Output = Result<String, GenerateError>> + Send + 'a>>;

/// A single-shot, non-streaming text completion backend.
pub trait LanguageModel: Send + Sync {
    /// Sends `prompt` and resolves to the model's raw output text.
    fn complete(&self, prompt: String) -> ModelFuture<'_>;
}

/// Builds a `Basic` Authorization value, only when both parts are present
/// and non-empty.
pub fn basic_auth_header(username: Option<&str>, password: Option<&str>) -> Option<String> {
    match (username, password) {
        (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
            let encoded =
                base64::engine::general_purpose::STANDARD.encode(format!("{}:{}", user, pass));
            Some(format!("Basic {}", encoded))
        }
        _ => None,
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f64,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct CompletionReply {
    response: Option<String>,
}

/// Client for an Ollama-compatible `/api/generate` endpoint.
#[derive(Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    config: GeneratorConfig,
}

impl OllamaClient {
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: GeneratorConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.config.base_url.trim_end_matches('/'))
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let payload = CompletionRequest {
            model: &self.config.model,
            prompt,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            stream: false,
        };

        let mut builder = self
            .client
            .post(self.endpoint())
            .header(CONTENT_TYPE, "application/json")
            .json(&payload);

        if let Some(auth) = basic_auth_header(
            self.config.username.as_deref(),
            self.config.password.as_deref(),
        ) {
            builder = builder.header(AUTHORIZATION, auth);
        }

        tracing::debug!(model = %self.config.model, "Requesting completion");
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let reply: CompletionReply = response
            .json()
            .await
            .map_err(|e| GenerateError::MalformedReply(e.to_string()))?;

        reply
            .response
            .ok_or_else(|| GenerateError::MalformedReply("missing `response` field".to_string()))
    }
}

impl LanguageModel for OllamaClient {
    fn complete(&self, prompt: String) -> ModelFuture<'_> {
        Box::pin(async move { self.generate(&prompt).await })
    }
}
