//! Client-side request/response state.
//!
//! `state` holds the pure reducer, `session` wires it to a relay and a
//! key/value store.

pub mod error;
pub mod history;
pub mod model;
pub mod relay;
pub mod render;
pub mod session;
pub mod state;
pub mod storage;

pub use error::ClientError;
pub use history::{RecentQueries, MAX_RECENT_QUERIES, RECENT_QUERIES_KEY};
pub use model::{DraftRequest, HeaderEntry, HttpMethod, ResponseView, SavedQuery};
pub use relay::{HttpRelayClient, RelayClient};
pub use render::{render_json, render_response, render_saved_query};
pub use session::Session;
pub use state::{reduce, Action, ClientState};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError};
