//! Error taxonomy for a single request, grounded on
//! `src/tracker/error.rs` / `src/torrust_http_tracker/errors.rs`'s use of
//! `thiserror`. These never cross a connection boundary: each variant maps
//! to one of the three per-request outcomes in spec §7 (bare 404, bare
//! bencoded failure, or silent close) and is handled entirely inside
//! `http::server`.

use thiserror::Error;

/// Why a connection was closed or answered without running the announce
/// or scrape handlers.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("request exceeded {0} bytes without a terminator")]
    BufferOverflow(usize),

    #[error("request not completed within the timeout")]
    Timeout,

    #[error("request line did not start with \"GET \"")]
    NotAGetRequest,

    #[error("request target did not match a known endpoint")]
    UnknownEndpoint,

    #[error("failed to read from the socket: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors setting up the listening socket. Fatal: the process prints these
/// and exits, matching the original's `check()` helper.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("can't create socket")]
    Socket(#[source] std::io::Error),

    #[error("can't bind socket")]
    Bind(#[source] std::io::Error),

    #[error("can't exec 'listen'")]
    Listen(#[source] std::io::Error),
}
