pub mod generate;
pub mod health;
pub mod proxy;
pub mod static_files;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::generate::{LanguageModel, OllamaClient};
use crate::proxy::{HttpProxyService, ProxyService};

/// Collaborators shared by the handlers.
#[derive(Clone)]
pub struct ServerState {
    pub proxy: Arc<dyn ProxyService>,
    pub model: Arc<dyn LanguageModel>,
}

impl ServerState {
    pub fn new(proxy: Arc<dyn ProxyService>, model: Arc<dyn LanguageModel>) -> Self {
        Self { proxy, model }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            HttpProxyService::arc(),
            Arc::new(OllamaClient::new(config.generator.clone())),
        )
    }
}

/// Builds the application router.
pub fn router(state: ServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/proxy", post(proxy::proxy_request))
        .route("/api/generate-json", post(generate::generate_json))
        .fallback(static_files::serve_static)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
