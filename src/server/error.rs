//! Error types for the HTTP server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::parser::Error as ParserError;
use crate::server::response::StatusCode;

/// Errors that can occur while serving a connection.
///
/// Each one is answered with a status-line-only response.
#[derive(Debug, Error)]
pub enum Error {
    /// Error parsing an HTTP request.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Requested file not found beneath the web root.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request head grew past the configured limit.
    #[error("Request exceeds {0} bytes without a header terminator")]
    RequestTooLarge(usize),

    /// The client did not finish sending its request in time.
    #[error("Timed out after {0:?} waiting for the request")]
    ReadTimeout(Duration),

    /// The connection handler panicked.
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl Error {
    /// The status sent to the client for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::ParseError(ParserError::UnsupportedMethod(_)) => StatusCode::MethodNotAllowed,
            Error::ParseError(_) | Error::RequestTooLarge(_) => StatusCode::BadRequest,
            Error::ReadTimeout(_) => StatusCode::RequestTimeout,
            Error::NotFound(_) => StatusCode::NotFound,
            Error::IoError(_) | Error::InternalError(_) => StatusCode::InternalServerError,
        }
    }
}

/// Errors that stop the server before or while it starts listening.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Invalid startup configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The listening socket could not be bound.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

impl StartupError {
    /// The process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            StartupError::Config(_) => 1,
            StartupError::Bind { .. } => 2,
        }
    }
}

/// Errors in the command line or the startup environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unrecognized argument: {0}")]
    UnknownFlag(String),

    #[error("Missing value for {0}")]
    MissingValue(&'static str),

    #[error("Missing required arguments (webRoot, webIP, webPort): {0} not given")]
    MissingFlag(&'static str),

    #[error("Invalid IP address: {0}")]
    InvalidAddress(String),

    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("Invalid web root {}: {source}", path.display())]
    InvalidRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
