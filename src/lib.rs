pub mod client;
pub mod config;
pub mod error;
pub mod generate;
pub mod proxy;
pub mod routes;
pub mod shared;

pub use config::{Config, GeneratorConfig};
pub use error::AppError;
pub use proxy::{execute_request, ProxyRequest, ProxyResponse};
pub use routes::{router, ServerState};
