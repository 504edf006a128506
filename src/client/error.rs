use thiserror::Error;

use super::storage::StorageError;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("URL is required")]
    EmptyUrl,

    #[error("Invalid JSON in request body: {0}")]
    InvalidJsonBody(String),

    #[error("Please enter a description of the JSON you want to generate")]
    EmptyDescription,

    #[error("Unknown HTTP method: {0}")]
    UnknownMethod(String),

    #[error("No saved query with id {0}")]
    UnknownQuery(String),

    #[error("HTTP error! Status: {0}")]
    RelayStatus(u16),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Generation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
