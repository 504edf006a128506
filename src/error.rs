use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generate::GenerateError;

/// Failures surfaced by the relay endpoints.
///
/// Every handler returns `Result<_, AppError>`, so nothing escapes a handler
/// without being turned into a JSON error payload.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("URL is required")]
    MissingUrl,

    #[error("Description is required")]
    MissingDescription,

    #[error("Failed to make request")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Failed to make request")]
    InvalidProxyInput(String),

    #[error("Failed to generate JSON")]
    Generation(#[from] GenerateError),

    #[error("Generated response is not valid JSON")]
    InvalidGeneratedJson { raw_response: String },
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingUrl | AppError::MissingDescription => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Diagnostic text attached as `details`, if this error carries any.
    pub fn details(&self) -> Option<String> {
        match self {
            AppError::RequestFailed(e) => Some(e.to_string()),
            AppError::InvalidProxyInput(details) => Some(details.clone()),
            AppError::Generation(e) => Some(e.to_string()),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        let body = match &self {
            AppError::InvalidGeneratedJson { raw_response } => json!({
                "error": message,
                "rawResponse": raw_response,
            }),
            _ => match self.details() {
                Some(details) => json!({ "error": message, "details": details }),
                None => json!({ "error": message }),
            },
        };

        (status, Json(body)).into_response()
    }
}
