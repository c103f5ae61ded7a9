//! HTTP response types and utilities.

use std::fmt;

use chrono::Utc;

/// Value of the `Server` header on successful responses.
const SERVER_NAME: &str = "myOwnWebServer";

/// HTTP status codes with their standard reason phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok = 200,
    BadRequest = 400,
    NotFound = 404,
    MethodNotAllowed = 405,
    RequestTimeout = 408,
    InternalServerError = 500,
    ServiceUnavailable = 503,
}

impl StatusCode {
    /// Get the reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::RequestTimeout => "Request Timeout",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// The numeric code.
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

/// Format a timestamp for the `Date` header (RFC 1123, always GMT).
pub fn http_date(time: chrono::DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Represents an HTTP response.
///
/// Headers keep their insertion order on the wire. Only `200 OK` responses
/// carry headers and a body; every other status is sent as the bare status
/// line followed by the blank line.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// The HTTP status code
    pub status: StatusCode,
    /// The HTTP headers, in the order they are sent
    pub headers: Vec<(String, String)>,
    /// The response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// A status-line-only response.
    pub fn status_only(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// A `200 OK` response carrying a file.
    ///
    /// The header block is exactly `Content-Length`, `Content-Type`, `Date`
    /// and `Server`, in that order.
    pub fn file(body: Vec<u8>, content_type: &str) -> Self {
        Self::file_at(body, content_type, Utc::now())
    }

    /// Like [`HttpResponse::file`] with an explicit `Date`.
    pub fn file_at(body: Vec<u8>, content_type: &str, date: chrono::DateTime<Utc>) -> Self {
        let headers = vec![
            ("Content-Length".to_string(), body.len().to_string()),
            ("Content-Type".to_string(), content_type.to_string()),
            ("Date".to_string(), http_date(date)),
            ("Server".to_string(), SERVER_NAME.to_string()),
        ];

        Self {
            status: StatusCode::Ok,
            headers,
            body,
        }
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The status line without its terminator, e.g. `HTTP/1.1 404 Not Found`.
    pub fn status_line(&self) -> String {
        format!("HTTP/1.1 {}", self.status)
    }

    /// Convert the response to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(128 + self.body.len());

        bytes.extend_from_slice(self.status_line().as_bytes());
        bytes.extend_from_slice(b"\r\n");

        for (name, value) in &self.headers {
            let header_line = format!("{name}: {value}\r\n");
            bytes.extend_from_slice(header_line.as_bytes());
        }

        // Add the empty line that separates headers from body
        bytes.extend_from_slice(b"\r\n");

        bytes.extend_from_slice(&self.body);

        bytes
    }
}
