//! Proxy service abstraction layer.
//!
//! Provides a trait-based abstraction for proxy request execution,
//! enabling dependency injection and easier testing.

use super::executor::execute_request;
use super::types::{ProxyRequest, ProxyResponse};
use crate::error::AppError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type ProxyFuture<'a> = Pin<Box<dyn Future<Output = Result<ProxyResponse, AppError>> + Send + 'a>>;

/// Trait for proxy services that execute HTTP requests.
///
/// This abstraction allows the router to be exercised with mock
/// implementations.
pub trait ProxyService: Send + Sync {
    /// Executes a proxy request and returns the normalized response.
    fn execute(&self, request: ProxyRequest) -> ProxyFuture<'_>;
}

/// Default HTTP proxy service backed by a shared `reqwest::Client`.
#[derive(Default, Clone)]
pub struct HttpProxyService {
    client: reqwest::Client,
}

impl HttpProxyService {
    /// Creates a new `HttpProxyService` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a preconfigured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Creates a new `HttpProxyService` wrapped in an `Arc`.
    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl ProxyService for HttpProxyService {
    fn execute(&self, request: ProxyRequest) -> ProxyFuture<'_> {
        Box::pin(async move { execute_request(&self.client, request).await })
    }
}
