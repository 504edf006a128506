pub mod executor;
pub mod response_builder;
pub mod service;
pub mod types;

pub use executor::{execute_request, method_allows_body};
pub use response_builder::{build_response, header_pairs, is_json_content, parse_body};
pub use service::{HttpProxyService, ProxyFuture, ProxyService};
pub use types::*;
