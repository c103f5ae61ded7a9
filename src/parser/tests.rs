//! Tests for the HTTP parser.

#[cfg(test)]
mod tests {
    use crate::parser::{decode_request, encode_request, parse_request, Error};

    #[test]
    fn test_parse_simple_get_request() {
        let request = b"GET /index.html HTTP/1.1\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.path, "/index.html");
    }

    #[test]
    fn test_headers_are_ignored() {
        let request = b"GET /a.txt HTTP/1.0\r\nHost: example.com\r\nInvalidHeader\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.path, "/a.txt");
    }

    #[test]
    fn test_version_is_not_validated() {
        let result = parse_request(b"GET /index.html HTTP/9.9\r\n\r\n").unwrap();
        assert_eq!(result.path, "/index.html");

        let result = parse_request(b"GET /index.html\r\n\r\n").unwrap();
        assert_eq!(result.path, "/index.html");
    }

    #[test]
    fn test_other_methods_are_unsupported() {
        for method in ["POST", "PUT", "DELETE", "HEAD", "OPTIONS", "PATCH"] {
            let request = format!("{method} /index.html HTTP/1.1\r\n\r\n");
            let result = parse_request(request.as_bytes());
            assert_eq!(result, Err(Error::UnsupportedMethod(method.to_string())));
        }
    }

    #[test]
    fn test_unknown_and_lowercase_methods_are_unsupported() {
        let result = parse_request(b"BREW /pot HTTP/1.1\r\n\r\n");
        assert_eq!(result, Err(Error::UnsupportedMethod("BREW".to_string())));

        let result = parse_request(b"get /index.html HTTP/1.1\r\n\r\n");
        assert_eq!(result, Err(Error::UnsupportedMethod("get".to_string())));

        let result = parse_request(b"GETX /index.html HTTP/1.1\r\n\r\n");
        assert_eq!(result, Err(Error::UnsupportedMethod("GETX".to_string())));
    }

    #[test]
    fn test_method_is_checked_before_target() {
        let result = parse_request(b"POST\r\n\r\n");
        assert_eq!(result, Err(Error::UnsupportedMethod("POST".to_string())));
    }

    #[test]
    fn test_missing_target() {
        let result = parse_request(b"GET\r\n\r\n");
        assert!(matches!(result, Err(Error::MalformedRequestLine(ref line)) if line == "GET"));
    }

    #[test]
    fn test_empty_target() {
        // Two spaces leave an empty second field.
        let result = parse_request(b"GET  /index.html HTTP/1.1\r\n\r\n");
        assert!(matches!(result, Err(Error::MalformedRequestLine(_))));
    }

    #[test]
    fn test_empty_request() {
        assert_eq!(parse_request(b""), Err(Error::EmptyRequest));
        assert_eq!(parse_request(b"\r\n\r\n"), Err(Error::EmptyRequest));
    }

    #[test]
    fn test_query_string_stays_in_path() {
        let result = parse_request(b"GET /search.html?q=test&page=1 HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(result.path, "/search.html?q=test&page=1");
    }

    #[test]
    fn test_percent_encoding_is_not_decoded() {
        let result = parse_request(b"GET /my%20file.txt HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(result.path, "/my%20file.txt");
    }

    #[test]
    fn test_bare_newline_line_ending() {
        let result = parse_request(b"GET /index.html HTTP/1.1\n\n").unwrap();
        assert_eq!(result.path, "/index.html");
    }

    #[test]
    fn test_non_ascii_bytes_are_decoded_one_per_char() {
        let result = parse_request(b"GET /caf\xE9.txt HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(result.path, "/caf\u{e9}.txt");
        assert_eq!(decode_request(b"\xFF\x00A"), "\u{ff}\u{0}A");
    }

    #[test]
    fn test_encode_request_restores_raw_bytes() {
        let raw = b"GET /caf\xC3\xA9.txt HTTP/1.1";
        assert_eq!(encode_request(&decode_request(raw)), raw.to_vec());
        assert_eq!(encode_request("\u{20ac}"), b"?".to_vec());
    }
}
