//! Server configuration.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::server::error::ConfigError;

const WEB_ROOT: &str = "-webRoot";
const WEB_IP: &str = "-webIP";
const WEB_PORT: &str = "-webPort";

/// HTTP server configuration.
///
/// Built once at startup and handed to the server; nothing reads it from a
/// global.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory files are served from.
    pub root: PathBuf,
    /// The address to bind to.
    pub addr: SocketAddr,
    /// The maximum number of concurrent connections.
    pub max_connections: usize,
    /// Size of each read from the socket.
    pub read_buffer_size: usize,
    /// Upper bound on the request head before the header terminator.
    pub max_request_size: usize,
    /// Time allowed for a client to send its whole request head.
    pub read_timeout: Duration,
    /// Time allowed for writing the response back to the client.
    pub write_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            max_connections: 64,
            read_buffer_size: 1024,
            max_request_size: 16 * 1024,
            read_timeout: Duration::from_secs(30),
            write_timeout: Duration::from_secs(30),
        }
    }
}

impl ServerConfig {
    /// Create a configuration for the given root and address with default limits.
    pub fn new(root: impl Into<PathBuf>, addr: SocketAddr) -> Self {
        Self {
            root: root.into(),
            addr,
            ..Self::default()
        }
    }

    /// Parse `-webRoot <path> -webIP <ip> -webPort <port>` in any order.
    ///
    /// `args` must not include the program name. Each flag consumes the
    /// following token as its value; a repeated flag overrides the earlier one.
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut root: Option<String> = None;
        let mut ip: Option<IpAddr> = None;
        let mut port: Option<u16> = None;

        let mut args = args.into_iter().map(Into::into);
        while let Some(flag) = args.next() {
            match flag.as_str() {
                WEB_ROOT => {
                    let value = args.next().ok_or(ConfigError::MissingValue(WEB_ROOT))?;
                    root = Some(value).filter(|v| !v.is_empty());
                }
                WEB_IP => {
                    let value = args.next().ok_or(ConfigError::MissingValue(WEB_IP))?;
                    let addr = value
                        .parse::<IpAddr>()
                        .map_err(|_| ConfigError::InvalidAddress(value))?;
                    ip = Some(addr);
                }
                WEB_PORT => {
                    let value = args.next().ok_or(ConfigError::MissingValue(WEB_PORT))?;
                    let number = match value.parse::<u16>() {
                        Ok(n) if n != 0 => n,
                        _ => return Err(ConfigError::InvalidPort(value)),
                    };
                    port = Some(number);
                }
                _ => return Err(ConfigError::UnknownFlag(flag)),
            }
        }

        let root = root.ok_or(ConfigError::MissingFlag(WEB_ROOT))?;
        let ip = ip.ok_or(ConfigError::MissingFlag(WEB_IP))?;
        let port = port.ok_or(ConfigError::MissingFlag(WEB_PORT))?;

        Ok(Self::new(root, SocketAddr::new(ip, port)))
    }

    /// Set the connection limit.
    pub fn with_max_connections(mut self, max_connections: usize) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }

    /// Set the size of a single socket read.
    pub fn with_read_buffer_size(mut self, read_buffer_size: usize) -> Self {
        self.read_buffer_size = read_buffer_size.max(1);
        self
    }

    /// Set the request head limit.
    pub fn with_max_request_size(mut self, max_request_size: usize) -> Self {
        self.max_request_size = max_request_size;
        self
    }

    /// Set the read timeout.
    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Set the write timeout.
    pub fn with_write_timeout(mut self, write_timeout: Duration) -> Self {
        self.write_timeout = write_timeout;
        self
    }
}
