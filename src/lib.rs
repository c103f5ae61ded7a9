//! A minimal static file HTTP/1.1 server.
//!
//! Files are served from a web root over a bare subset of HTTP/1.1: `GET`
//! only, one request per connection, and no headers beyond what is needed to
//! deliver a file. All activity is logged to an append-only file.
//!
//! # Features
//!
//! - Serves HTML, plain text, JPEG and GIF files, everything else as
//!   `application/octet-stream`
//! - Refuses targets that resolve outside the web root
//! - Bounded, timed request reads
//! - One task per connection with a connection limit
//! - Status-line-only error responses; details go to the log only
//!
//! # Examples
//!
//! ## Parsing a request line
//!
//! ```
//! use myownwebserver::{parse_request, ParserError};
//!
//! let request = parse_request(b"GET /index.html HTTP/1.1\r\n\r\n").unwrap();
//! assert_eq!(request.path, "/index.html");
//!
//! match parse_request(b"POST /index.html HTTP/1.1\r\n\r\n") {
//!     Err(ParserError::UnsupportedMethod(method)) => assert_eq!(method, "POST"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
//!
//! ## Content types
//!
//! ```
//! use myownwebserver::content_type;
//!
//! assert_eq!(content_type("/index.HTML"), "text/html");
//! assert_eq!(content_type("/photo.jpg"), "image/jpeg");
//! assert_eq!(content_type("/archive.tar.gz"), "application/octet-stream");
//! ```
//!
//! ## Running a server
//!
//! ```no_run
//! use myownwebserver::{HttpServer, ServerConfig};
//!
//! # async fn run() -> Result<(), myownwebserver::StartupError> {
//! let config = ServerConfig::from_args(["-webRoot", "/srv/www", "-webIP", "127.0.0.1", "-webPort", "5000"])?;
//! HttpServer::new(config)?.start().await
//! # }
//! ```

pub mod logger;

pub mod parser;

pub mod server;

// Re-export commonly used items for convenience
pub use parser::{Error as ParserError, HttpRequest, parse_request};
pub use server::{
    content_type, ConfigError, Error as ServerError, HttpResponse, HttpServer, ServerConfig,
    StartupError, StaticFiles, StatusCode,
};
