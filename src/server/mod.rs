//! Static file HTTP server.
//!
//! Accepts connections, reads a request head, resolves the target beneath the
//! web root and writes back either the file or a bare status line.

mod response;
mod config;
mod error;
mod files;
mod reader;
mod http_server;

// Re-export public items
pub use response::{http_date, HttpResponse, StatusCode};
pub use config::ServerConfig;
pub use error::{ConfigError, Error, StartupError};
pub use files::{content_type, ServedFile, StaticFiles};
pub use http_server::HttpServer;
