//! The announce handler (C4), spec §4.4: validates parameters, touches the
//! registry, and builds the reply body.

use std::net::{Ipv4Addr, ToSocketAddrs};

use tracing::debug;

use super::query::Target;
use super::request::{AnnounceRequest, IpOverride, ReplyFormat};
use super::response::{compact_reply, dict_list_reply, failure_reply};
use crate::tracker::Registry;

/// Either a complete bencoded success body (to be wrapped in the 200
/// headers by the caller) or the bare failure-reason body (sent without
/// headers, per spec §6).
pub enum AnnounceOutcome {
    Success(Vec<u8>),
    Failure(Vec<u8>),
}

/// Resolves the `ip` override, if present, to the address to register the
/// peer under. A literal dotted-quad is used verbatim; a hostname goes
/// through a blocking DNS lookup for its first A record. Resolution
/// failure silently falls back to `source_ip` (spec §4.4, §7 — DNSFailure
/// is not an error).
fn resolve_ip(source_ip: Ipv4Addr, ip_override: Option<&IpOverride>) -> Ipv4Addr {
    match ip_override {
        None => source_ip,
        Some(IpOverride::Literal(ip)) => {
            debug!(%ip, "using ip override verbatim");
            *ip
        }
        Some(IpOverride::Hostname(host)) => {
            let resolved = (host.as_str(), 0u16)
                .to_socket_addrs()
                .ok()
                .and_then(|mut addrs| {
                    addrs.find_map(|addr| match addr.ip() {
                        std::net::IpAddr::V4(v4) => Some(v4),
                        std::net::IpAddr::V6(_) => None,
                    })
                });
            match resolved {
                Some(ip) => {
                    debug!(host, %ip, "resolved ip override via DNS");
                    ip
                }
                None => {
                    debug!(host, "ip override did not resolve, falling back to source address");
                    source_ip
                }
            }
        }
    }
}

/// Runs one announce to completion: parses, upserts the peer into
/// `registry`, and builds the reply body. `now` comes from the caller's
/// [`crate::clock::Clock`] so tests can hold time fixed.
pub fn handle(registry: &mut Registry, target: &Target, source_ip: Ipv4Addr, now: u64) -> AnnounceOutcome {
    let request = match AnnounceRequest::parse(target) {
        Ok(request) => request,
        Err(err) => {
            debug!(%err, "announce request failed validation");
            return AnnounceOutcome::Failure(failure_reply());
        }
    };

    let ip = resolve_ip(source_ip, request.ip_override.as_ref());

    let interval = registry.upsert(
        &request.info_hash,
        ip,
        request.port,
        request.peer_id.clone(),
        request.uploaded,
        request.downloaded,
        request.left,
        now,
    );

    let peers = registry.peers_excluding(&request.info_hash, ip, request.port, &request.peer_id);

    let body = match request.format {
        ReplyFormat::Compact => compact_reply(interval, peers.into_iter()),
        ReplyFormat::DictionaryList => match dict_list_reply(interval, peers.into_iter()) {
            Ok(body) => body,
            Err(_) => return AnnounceOutcome::Failure(failure_reply()),
        },
    };

    AnnounceOutcome::Success(body)
}
