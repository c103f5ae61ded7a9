//! Error types for the HTTP parser.

use thiserror::Error;

/// Errors that can occur during HTTP request parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The request is empty.
    #[error("Empty request")]
    EmptyRequest,

    /// The request line does not start with the `GET` token.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The request line is malformed (missing or empty target).
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),
}
