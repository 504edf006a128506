//! Shared utilities used by both the relay and the client side.

pub mod status_text;

pub use status_text::{status_text, StatusClass};
