//! HTTP server implementation.

use std::any::Any;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use log::{error, info, warn};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::signal;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time;

use crate::parser::{decode_request, parse_request};
use crate::server::config::ServerConfig;
use crate::server::error::{ConfigError, Error, StartupError};
use crate::server::files::StaticFiles;
use crate::server::reader::read_request;
use crate::server::response::{HttpResponse, StatusCode};

/// A static file server.
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    files: Arc<StaticFiles>,
}

impl HttpServer {
    /// Create a new server. Fails if the web root is not an existing directory.
    pub fn new(config: ServerConfig) -> Result<Self, ConfigError> {
        let files = StaticFiles::new(&config.root)?;
        Ok(Self {
            config,
            files: Arc::new(files),
        })
    }

    /// Bind the TCP listener.
    pub async fn setup_listener(&self) -> Result<TcpListener, StartupError> {
        let addr = self.config.addr;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| StartupError::Bind { addr, source })?;
        info!(
            target: "SERVER STARTED",
            "Listening on http://{addr}, serving {root}",
            root = self.files.root().display()
        );
        Ok(listener)
    }

    /// Start the server and serve until Ctrl+C.
    pub async fn start(&self) -> Result<(), StartupError> {
        let listener = self.setup_listener().await?;

        let ctrl_c = async {
            match signal::ctrl_c().await {
                Ok(()) => info!(target: "INFO", "Received Ctrl+C, initiating graceful shutdown"),
                Err(e) => {
                    error!(target: "ERROR", "Error setting up Ctrl+C handler: {e}");
                    std::future::pending::<()>().await;
                }
            }
        };

        self.serve(listener, ctrl_c).await;
        Ok(())
    }

    /// Accept connections on `listener` until `shutdown` completes.
    ///
    /// Each connection is served by its own task; at most
    /// `max_connections` run at once. Nothing a single connection does can
    /// end this loop.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let semaphore = Arc::new(Semaphore::new(self.config.max_connections));
        let config = Arc::new(self.config.clone());
        let mut tasks = JoinSet::new();

        tokio::pin!(shutdown);

        loop {
            info!(target: "INFO", "Waiting for connection...");

            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    info!(target: "INFO", "Shutting down server...");
                    break;
                }

                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => {
                            Self::handle_new_connection(
                                socket,
                                addr,
                                semaphore.clone(),
                                self.files.clone(),
                                config.clone(),
                                &mut tasks,
                            ).await;
                        }
                        Err(e) => Self::handle_accept_error(e).await,
                    }
                }
            }

            Self::reap_finished(&mut tasks);
        }

        Self::perform_shutdown(&mut tasks).await;
    }

    /// Hand a freshly accepted connection to its own task.
    async fn handle_new_connection(
        mut socket: TcpStream,
        addr: SocketAddr,
        semaphore: Arc<Semaphore>,
        files: Arc<StaticFiles>,
        config: Arc<ServerConfig>,
        tasks: &mut JoinSet<()>,
    ) {
        info!(target: "INFO", "Client connected from {addr}.");

        let permit = match semaphore.try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                warn!(target: "WARN", "Connection limit reached, rejecting connection from {addr}");
                let response = HttpResponse::status_only(StatusCode::ServiceUnavailable);
                match Self::write_response(&mut socket, &response, config.write_timeout).await {
                    Ok(()) => Self::log_response(&response),
                    Err(e) => warn!(target: "WARN", "Could not send 503 to {addr}: {e}"),
                }
                return;
            }
        };

        tasks.spawn(async move {
            // Released when the connection is done.
            let _permit = permit;

            if let Err(e) = Self::serve_connection(&mut socket, &files, &config).await {
                error!(target: "ERROR", "Error sending response to {addr}: {e}");
            }
            let _ = socket.shutdown().await;
        });
    }

    async fn handle_accept_error(e: std::io::Error) {
        error!(target: "ERROR", "Error accepting connection: {e}");

        // Usually resource exhaustion; give it a moment before retrying.
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    }

    /// Collect tasks that have already finished, logging any that panicked.
    fn reap_finished(tasks: &mut JoinSet<()>) {
        while let Some(res) = tasks.try_join_next() {
            if let Err(e) = res {
                error!(target: "ERROR", "Connection task failed: {e}");
            }
        }
    }

    /// Perform graceful shutdown.
    async fn perform_shutdown(tasks: &mut JoinSet<()>) {
        info!(target: "INFO", "Waiting for {len} active connections to complete...", len = tasks.len());
        let shutdown_timeout = tokio::time::Duration::from_secs(30);
        let drained = tokio::time::timeout(shutdown_timeout, async {
            while let Some(res) = tasks.join_next().await {
                if let Err(e) = res {
                    error!(target: "ERROR", "Connection task failed during shutdown: {e}");
                }
            }
        })
        .await;

        if drained.is_err() {
            warn!(target: "WARN", "Aborting {len} connections still open after {shutdown_timeout:?}", len = tasks.len());
            tasks.abort_all();
        }

        info!(target: "INFO", "Server shutdown complete");
    }

    /// Serve a single connection, answering 500 if handling it panics.
    ///
    /// Behaves like [`HttpServer::handle_connection`] otherwise.
    pub async fn serve_connection<S>(
        socket: &mut S,
        files: &StaticFiles,
        config: &ServerConfig,
    ) -> Result<StatusCode, Error>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let handled = AssertUnwindSafe(Self::handle_connection(socket, files, config))
            .catch_unwind()
            .await;

        match handled {
            Ok(result) => result,
            Err(panic) => {
                let response = Self::error_response(&Error::InternalError(panic_message(&*panic)));
                Self::write_response(socket, &response, config.write_timeout).await?;
                Self::log_response(&response);
                Ok(response.status)
            }
        }
    }

    /// Serve a single connection: read, parse, resolve, respond.
    ///
    /// Every failure short of the response itself not being writable is
    /// turned into a status-line-only response; the returned status is what
    /// the client was sent. An `Err` means the response could not be written.
    pub async fn handle_connection<S>(
        socket: &mut S,
        files: &StaticFiles,
        config: &ServerConfig,
    ) -> Result<StatusCode, Error>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let response = match Self::respond(socket, files, config).await {
            Ok(response) => response,
            Err(e) => Self::error_response(&e),
        };

        if let Err(e) = Self::write_response(socket, &response, config.write_timeout).await {
            // A client that stopped reading will not take a 500 either.
            if response.status == StatusCode::Ok && e.kind() != io::ErrorKind::TimedOut {
                error!(target: "ERROR", "Internal Server Error: {e}");
                let fallback = HttpResponse::status_only(StatusCode::InternalServerError);
                if Self::write_response(socket, &fallback, config.write_timeout).await.is_ok() {
                    Self::log_response(&fallback);
                }
            }
            return Err(Error::IoError(e));
        }

        Self::log_response(&response);
        Ok(response.status)
    }

    async fn respond<S>(
        socket: &mut S,
        files: &StaticFiles,
        config: &ServerConfig,
    ) -> Result<HttpResponse, Error>
    where
        S: AsyncRead + Unpin,
    {
        let raw = read_request(socket, config).await?;
        info!(target: "REQUEST", "{}", decode_request(&raw).replace("\r\n", " "));

        let request = parse_request(&raw)?;
        let file = files.read(&request.path).await?;

        Ok(HttpResponse::file(file.bytes, file.content_type))
    }

    /// Write and flush `response`, giving up with `TimedOut` after `limit`.
    pub(crate) async fn write_response<S>(
        socket: &mut S,
        response: &HttpResponse,
        limit: Duration,
    ) -> io::Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        let write = async {
            socket.write_all(&response.to_bytes()).await?;
            socket.flush().await
        };

        match time::timeout(limit, write).await {
            Ok(result) => result,
            Err(_) => Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("response not written within {limit:?}"),
            )),
        }
    }

    /// Log an error and build the response the client gets for it.
    ///
    /// Error details stay in the log; the client only sees the status line.
    fn error_response(e: &Error) -> HttpResponse {
        let status = e.status_code();
        if status == StatusCode::InternalServerError {
            error!(target: "ERROR", "Server encountered an error: {e}");
        } else {
            info!(target: "INFO", "{e}");
        }
        HttpResponse::status_only(status)
    }

    fn log_response(response: &HttpResponse) {
        match response.status {
            StatusCode::Ok => info!(
                target: "RESPONSE",
                "{status} Content-Type: {content_type} Content-Length: {length}",
                status = response.status,
                content_type = response.header("Content-Type").unwrap_or_default(),
                length = response.body.len(),
            ),
            _ => info!(target: "RESPONSE", "{}", response.status_line()),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "connection handler panicked".to_string()
    }
}
