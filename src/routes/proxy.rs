use axum::{body::Bytes, extract::State, Json};

use super::ServerState;
use crate::error::AppError;
use crate::proxy::{ProxyRequest, ProxyResponse};

pub async fn proxy_request(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<Json<ProxyResponse>, AppError> {
    let result = match serde_json::from_slice::<ProxyRequest>(&body) {
        Ok(request) => state.proxy.execute(request).await,
        Err(e) => Err(AppError::InvalidProxyInput(e.to_string())),
    };

    match result {
        Ok(response) => {
            tracing::debug!(status = response.status, "Request relayed");
            Ok(Json(response))
        }
        Err(e) => {
            tracing::error!(error = %e, details = ?e.details(), "Proxy error");
            Err(e)
        }
    }
}
