//! Reply bodies (spec §4.4, §6). The compact form is hand-written byte by
//! byte, mirroring the original's `write_compact()` — a derived
//! `Serialize` can't be trusted to emit a raw binary blob as a bencoded
//! string without going through `serde_bytes`, and at this size plain
//! byte-pushing is clearer than fighting the derive. The dictionary-list
//! form instead goes through `serde_bencode`, matching the original's
//! separate `write()` path for that format.

use serde::Serialize;

use crate::tracker::Peer;

/// `d 8:interval i<n>e 5:peers <len>:<blob> e`, blob = 6 bytes per peer
/// (4 bytes IPv4 network order, 2 bytes port network order), insertion
/// order preserved.
#[must_use]
pub fn compact_reply<'a>(interval: u64, peers: impl Iterator<Item = &'a Peer>) -> Vec<u8> {
    let mut blob = Vec::new();
    for peer in peers {
        blob.extend_from_slice(&peer.ip.octets());
        blob.extend_from_slice(&peer.port.to_be_bytes());
    }

    let mut out = Vec::new();
    out.extend_from_slice(b"d8:intervali");
    out.extend_from_slice(interval.to_string().as_bytes());
    out.extend_from_slice(b"e5:peers");
    out.extend_from_slice(blob.len().to_string().as_bytes());
    out.push(b':');
    out.extend_from_slice(&blob);
    out.push(b'e');
    out
}

#[derive(Serialize)]
struct PeerEntry {
    ip: String,
    port: u16,
}

#[derive(Serialize)]
struct DictListReply {
    interval: u64,
    peers: Vec<PeerEntry>,
}

/// `d 8:interval i<n>e 5:peers l <peer-dicts> e e`, insertion order
/// preserved, requesting peer excluded.
pub fn dict_list_reply<'a>(interval: u64, peers: impl Iterator<Item = &'a Peer>) -> Result<Vec<u8>, serde_bencode::Error> {
    let reply = DictListReply {
        interval,
        peers: peers
            .map(|p| PeerEntry {
                ip: p.ip.to_string(),
                port: p.port,
            })
            .collect(),
    };
    serde_bencode::to_bytes(&reply)
}

/// `d 14:failure reason <len>:<message> e`, the fixed invalid-request body
/// sent without HTTP headers on validation failure (spec §6).
pub const FAILURE_REASON: &str = "invalid request (see http://bitconjurer.org/BitTorrent/protocol.html)";

#[must_use]
pub fn failure_reply() -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"d14:failure reason");
    out.extend_from_slice(FAILURE_REASON.len().to_string().as_bytes());
    out.push(b':');
    out.extend_from_slice(FAILURE_REASON.as_bytes());
    out.push(b'e');
    out
}
