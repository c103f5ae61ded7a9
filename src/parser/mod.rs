//! HTTP parser module.
//!
//! Extracts the target from the first line of a `GET` request. Nothing
//! beyond the request line is interpreted.

mod request;
mod error;
mod tests;

// Re-export public items
pub use request::HttpRequest;
pub use error::Error;

pub use request::{decode_request, encode_request, parse_request};
