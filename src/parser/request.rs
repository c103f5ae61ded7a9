//! HTTP request parsing and representation.

use crate::parser::error::Error;

/// The only method this server answers.
const GET: &str = "GET";

/// Represents an HTTP request.
///
/// Only the request line is looked at. Headers are read off the wire but
/// never interpreted, and the version field is not validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// The request target exactly as sent, query string included, in the
    /// single-byte decoding of [`decode_request`].
    pub path: String,
}

impl HttpRequest {
    /// Create a new `GET` request for `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Decode raw request bytes as single-byte (ISO-8859-1) text.
///
/// Every byte maps to exactly one `char`, so this never fails and never
/// loses information, whatever the client sent.
pub fn decode_request(input: &[u8]) -> String {
    input.iter().map(|&b| char::from(b)).collect()
}

/// Recover the bytes [`decode_request`] was given.
///
/// Characters beyond U+00FF cannot come out of [`decode_request`]; they are
/// replaced with `?`.
pub fn encode_request(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(c).unwrap_or(b'?'))
        .collect()
}

/// Parse an HTTP request from a byte slice.
///
/// The first line is split on single spaces as `METHOD SP TARGET SP VERSION`.
/// The method is checked first: anything other than the exact token `GET` is
/// rejected with [`Error::UnsupportedMethod`] before the target is looked at.
/// A `GET` line without a non-empty target yields
/// [`Error::MalformedRequestLine`].
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, Error> {
    let text = decode_request(input);

    let request_line = match text.lines().next() {
        Some(line) if !line.is_empty() => line,
        _ => return Err(Error::EmptyRequest),
    };

    let mut fields = request_line.split(' ');

    // `split` always yields at least one item
    let method = fields.next().unwrap_or_default();
    if method != GET {
        return Err(Error::UnsupportedMethod(method.to_string()));
    }

    match fields.next() {
        Some(target) if !target.is_empty() => Ok(HttpRequest::new(target)),
        _ => Err(Error::MalformedRequestLine(request_line.to_string())),
    }
}
