//! Reading a request head off a connection.

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time;

use crate::server::config::ServerConfig;
use crate::server::error::Error;

/// The blank line ending an HTTP header block.
pub const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Read from `socket` until the header terminator arrives or the peer closes.
///
/// Reads happen in chunks of `read_buffer_size`. The whole read must finish
/// within `read_timeout`, and the accumulated bytes may not pass
/// `max_request_size` without a terminator having been seen. A peer that
/// closes early is not an error; whatever arrived is returned.
pub async fn read_request<S>(socket: &mut S, config: &ServerConfig) -> Result<Vec<u8>, Error>
where
    S: AsyncRead + Unpin,
{
    let read = read_until_terminator(socket, config.read_buffer_size, config.max_request_size);
    match time::timeout(config.read_timeout, read).await {
        Ok(result) => result,
        Err(_) => Err(Error::ReadTimeout(config.read_timeout)),
    }
}

async fn read_until_terminator<S>(
    socket: &mut S,
    chunk_size: usize,
    limit: usize,
) -> Result<Vec<u8>, Error>
where
    S: AsyncRead + Unpin,
{
    let mut request = Vec::new();
    let mut buf = vec![0; chunk_size.max(1)];

    loop {
        let n = socket.read(&mut buf).await?;
        if n == 0 {
            break;
        }

        // The terminator may straddle two reads.
        let search_from = request.len().saturating_sub(HEADER_TERMINATOR.len() - 1);
        request.extend_from_slice(&buf[..n]);

        if contains_terminator(&request[search_from..]) {
            break;
        }
        if request.len() > limit {
            return Err(Error::RequestTooLarge(limit));
        }
    }

    Ok(request)
}

fn contains_terminator(bytes: &[u8]) -> bool {
    bytes
        .windows(HEADER_TERMINATOR.len())
        .any(|window| window == HEADER_TERMINATOR)
}
