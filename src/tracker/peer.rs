use std::net::Ipv4Addr;

use crate::primitives::PeerId;

/// A participating client for one torrent, grounded on
/// `torrust_tracker_primitives::peer::Peer` but trimmed to the fields
/// spec §3 actually names — no `AnnounceEvent` stored (the tracker
/// validates it, never acts on it) and an IPv4-only address, matching the
/// Non-goal that drops IPv6.
#[derive(Debug, Clone)]
pub struct Peer {
    pub ip: Ipv4Addr,
    pub port: u16,
    pub peer_id: PeerId,
    pub uploaded: u64,
    pub downloaded: u64,
    pub left: u64,
    pub last_update: u64,
    pub expire_at: u64,
}

impl Peer {
    /// The (ip, port, peer_id) triple that identifies this peer within its
    /// torrent (spec §3, "Peer identity within a torrent").
    #[must_use]
    pub fn matches(&self, ip: Ipv4Addr, port: u16, peer_id: &PeerId) -> bool {
        self.ip == ip && self.port == port && &self.peer_id == peer_id
    }
}
