//! The connection driver (C6), spec §4.6: a single-threaded, blocking
//! accept loop. Deliberately not async — the HARD CORE's concurrency
//! model (spec §5) forbids a task scheduler entirely, so this departs
//! from the teacher lineage's `tokio`/`axum` stack and goes straight to
//! `std::net`, the way `packages/... ` never does but `tracker.c`'s
//! `main()`/`proceed()` always did.

use std::io::{Read, Write};
use std::net::{Ipv4Addr, SocketAddr, TcpListener, TcpStream};
use std::time::{Duration, Instant};

use socket2::{Domain, Socket, Type};
use tracing::{debug, info, warn};

use super::query::{Endpoint, Target};
use super::{announce, reply, scrape};
use crate::clock::Clock;
use crate::error::{FatalError, ProtocolError};
use crate::tracker::Registry;

pub const REQUEST_CAP: usize = 2048;
pub const READ_TIMEOUT: Duration = Duration::from_secs(10);
pub const LISTEN_BACKLOG: i32 = 50;

/// Binds an IPv4 TCP listener on all interfaces with an explicit backlog
/// of 50 — `TcpListener::bind` alone hands the backlog choice to the
/// platform default, so this goes through `socket2` for the same reason
/// the sibling tracker implementations in this lineage do.
pub fn bind(port: u16) -> Result<TcpListener, FatalError> {
    let socket = Socket::new(Domain::IPV4, Type::STREAM, None).map_err(FatalError::Socket)?;
    let address: SocketAddr = (Ipv4Addr::UNSPECIFIED, port).into();
    socket.set_reuse_address(true).map_err(FatalError::Socket)?;
    socket.bind(&address.into()).map_err(FatalError::Bind)?;
    socket.listen(LISTEN_BACKLOG).map_err(FatalError::Listen)?;
    Ok(socket.into())
}

/// Accepts connections forever, handling each to completion before the
/// next `accept()` — spec §5's "serves one connection at a time".
pub fn run(listener: &TcpListener, registry: &mut Registry, clock: &dyn Clock) -> ! {
    loop {
        match listener.accept() {
            Ok((stream, addr)) => handle_connection(stream, addr, registry, clock),
            Err(err) => warn!(%err, "failed to accept connection"),
        }
    }
}

fn handle_connection(mut stream: TcpStream, addr: SocketAddr, registry: &mut Registry, clock: &dyn Clock) {
    let deadline = Instant::now() + READ_TIMEOUT;
    info!(%addr, "accepted connection");

    let source_ip = match addr {
        SocketAddr::V4(v4) => *v4.ip(),
        SocketAddr::V6(_) => Ipv4Addr::UNSPECIFIED,
    };

    let request = match read_request(&mut stream, deadline) {
        Ok(request) => request,
        Err(ProtocolError::NotAGetRequest) => {
            let _ = stream.write_all(&reply::not_found_reply());
            return;
        }
        Err(err) => {
            debug!(%err, "closing connection without a reply");
            return;
        }
    };

    let Some(target_bytes) = extract_target(&request) else {
        debug!("malformed request line, closing without a reply");
        return;
    };

    let target = match Target::parse(target_bytes) {
        Ok(target) => target,
        Err(err) => {
            debug!(%err, "query parse failure, closing without a reply");
            return;
        }
    };

    registry.sweep(clock.now());

    let reply = match target {
        None => {
            warn!(err = %ProtocolError::UnknownEndpoint, "request target matched no known endpoint");
            reply::not_found_reply()
        }
        Some(target) => match target.endpoint {
            Endpoint::Scrape => {
                debug!("dispatching to scrape stub");
                scrape::handle()
            }
            Endpoint::Announce => {
                debug!("dispatching to announce handler");
                match announce::handle(registry, &target, source_ip, clock.now()) {
                    announce::AnnounceOutcome::Success(body) => {
                        info!(%addr, "announce succeeded");
                        reply::ok_reply(&body)
                    }
                    announce::AnnounceOutcome::Failure(body) => {
                        warn!(%addr, "announce rejected");
                        body
                    }
                }
            }
        },
    };

    let _ = stream.write_all(&reply);
}

/// Reads until the last four bytes are `\r\n\r\n`, the buffer would exceed
/// [`REQUEST_CAP`], or `deadline` passes. `deadline` bounds the whole
/// request, not any one `read()` call: `set_read_timeout` only limits a
/// single syscall, so it's recomputed from the remaining time before every
/// read rather than set once to [`READ_TIMEOUT`] — otherwise a client
/// trickling in a few bytes at a time, each arriving just under the
/// timeout, could hold the connection open indefinitely.
fn read_request(stream: &mut TcpStream, deadline: Instant) -> Result<Vec<u8>, ProtocolError> {
    let mut buffer = Vec::with_capacity(REQUEST_CAP);
    let mut chunk = [0u8; 512];

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(ProtocolError::Timeout);
        }
        stream.set_read_timeout(Some(remaining)).map_err(ProtocolError::Io)?;

        let read = stream.read(&mut chunk).map_err(|err| {
            if matches!(err.kind(), std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut) {
                ProtocolError::Timeout
            } else {
                ProtocolError::Io(err)
            }
        })?;

        if read == 0 {
            break;
        }

        buffer.extend_from_slice(&chunk[..read]);

        if buffer.len() > REQUEST_CAP {
            return Err(ProtocolError::BufferOverflow(REQUEST_CAP));
        }

        if buffer.ends_with(b"\r\n\r\n") {
            break;
        }
    }

    if !buffer.starts_with(b"GET ") {
        return Err(ProtocolError::NotAGetRequest);
    }

    Ok(buffer)
}

/// The bytes between `GET ` and the next space on the request line.
fn extract_target(request: &[u8]) -> Option<&[u8]> {
    let rest = request.strip_prefix(b"GET ")?;
    let end = rest.iter().position(|&b| b == b' ')?;
    Some(&rest[..end])
}
