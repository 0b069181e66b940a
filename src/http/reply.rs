//! Fixed HTTP response envelopes (spec §6), byte-exact with the original's
//! `notfound`/200-header string literals.

const NOT_FOUND_HEADERS: &str = "HTTP/1.1 404 Not Found\r\nServer: mini-tracker\r\nConnection: close\r\nContent-Type: text/html\r\n\r\n";
const NOT_FOUND_BODY: &str = "<html><head>404 NOT FOUND</head><body><h1>404</h1>Page not found!</body></html>";

const OK_HEADERS: &str = "HTTP/1.1 200 OK\r\nServer: mini-tracker\r\nConnection: close\r\nCache-Control: no-cache\r\nContent-Type: text/plain\r\n\r\n";

#[must_use]
pub fn not_found_reply() -> Vec<u8> {
    let mut out = Vec::with_capacity(NOT_FOUND_HEADERS.len() + NOT_FOUND_BODY.len());
    out.extend_from_slice(NOT_FOUND_HEADERS.as_bytes());
    out.extend_from_slice(NOT_FOUND_BODY.as_bytes());
    out
}

/// Wraps a successfully built bencoded body in the fixed 200 headers. The
/// failure-reason body (spec §6) deliberately does NOT go through this —
/// it is written bare, matching the original's historical wire behavior.
#[must_use]
pub fn ok_reply(body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(OK_HEADERS.len() + body.len());
    out.extend_from_slice(OK_HEADERS.as_bytes());
    out.extend_from_slice(body);
    out
}
