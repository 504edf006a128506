//! JSON body generation backed by a language-model server.

pub mod extract;
pub mod model;
pub mod prompt;
pub mod service;

pub use extract::extract_json_text;
pub use model::{basic_auth_header, GenerateError, LanguageModel, ModelFuture, OllamaClient};
pub use prompt::prepare_json_generation_prompt;
pub use service::generate_json;
