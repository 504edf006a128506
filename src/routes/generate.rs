use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};

use super::ServerState;
use crate::error::AppError;
use crate::generate::GenerateError;

#[derive(Debug, Deserialize)]
pub struct GenerateJsonRequest {
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateJsonResponse {
    /// JSON text that is known to parse.
    pub json: String,
}

pub async fn generate_json(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<Json<GenerateJsonResponse>, AppError> {
    let result = match serde_json::from_slice::<GenerateJsonRequest>(&body) {
        Ok(request) => {
            crate::generate::generate_json(state.model.as_ref(), request.description.as_deref())
                .await
        }
        Err(e) => Err(GenerateError::InvalidInput(e.to_string()).into()),
    };

    match result {
        Ok(json) => Ok(Json(GenerateJsonResponse { json })),
        Err(e) => {
            tracing::error!(error = %e, details = ?e.details(), "Error generating JSON");
            Err(e)
        }
    }
}
