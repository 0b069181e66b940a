use std::net::Ipv4Addr;

use super::peer::Peer;
use crate::primitives::PeerId;

/// One swarm: the peers known for a single info hash.
///
/// `peers` preserves insertion order (spec §3's invariant, observable in
/// announce replies — §4.4). `peer_count`/`active_count` are carried as
/// fields rather than derived on every read because the interval
/// controller (C2) needs last-sweep values, not a fresh scan per
/// announce — the same tradeoff the original's `struct base` makes with
/// `cpeers`/`cuppeers`.
#[derive(Debug, Default)]
pub struct Torrent {
    peers: Vec<Peer>,
    peer_count: usize,
    active_count: usize,
}

/// Peers are considered part of the "active" population used by the
/// interval formula once their expiry is still this far in the future.
pub const ACTIVE_HORIZON_SECS: u64 = 60;

impl Torrent {
    #[must_use]
    pub fn peer_count(&self) -> usize {
        self.peer_count
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    #[must_use]
    pub fn peers(&self) -> &[Peer] {
        &self.peers
    }

    fn find_mut(&mut self, ip: Ipv4Addr, port: u16, peer_id: &PeerId) -> Option<&mut Peer> {
        self.peers.iter_mut().find(|p| p.matches(ip, port, peer_id))
    }

    /// Inserts a new peer or refreshes an existing one in place, keeping
    /// `peer_count`/`active_count` consistent. Returns the peer's position
    /// so the caller can finish stamping `last_update`/`expire_at` once it
    /// knows the freshly recomputed interval.
    pub fn upsert(&mut self, ip: Ipv4Addr, port: u16, peer_id: PeerId, uploaded: u64, downloaded: u64, left: u64) -> usize {
        if let Some(existing) = self.find_mut(ip, port, &peer_id) {
            existing.uploaded = uploaded;
            existing.downloaded = downloaded;
            existing.left = left;
            return self.peers.iter().position(|p| p.matches(ip, port, &peer_id)).expect("just matched above");
        }

        self.peers.push(Peer {
            ip,
            port,
            peer_id,
            uploaded,
            downloaded,
            left,
            last_update: 0,
            expire_at: 0,
        });
        self.peer_count += 1;
        self.active_count += 1;
        self.peers.len() - 1
    }

    pub fn stamp(&mut self, index: usize, now: u64, expire_at: u64) {
        let peer = &mut self.peers[index];
        peer.last_update = now;
        peer.expire_at = expire_at;
    }

    /// Peers other than the one at `exclude_index`'s identity — excluded by
    /// identity, not position (spec §9's Open Question: refreshing an
    /// existing peer still excludes the pre-existing entry it updated, by
    /// matching (ip, port, peer_id), never by pointer/index equality).
    pub fn peers_excluding(&self, ip: Ipv4Addr, port: u16, peer_id: &PeerId) -> impl Iterator<Item = &Peer> {
        self.peers.iter().filter(move |p| !p.matches(ip, port, peer_id))
    }

    /// Removes peers past their expiry, recomputes `active_count` for
    /// survivors, and reports whether the torrent is now empty (the caller
    /// removes it from the registry in that case).
    pub fn sweep(&mut self, now: u64) -> bool {
        self.peers.retain(|p| p.expire_at >= now);
        self.peer_count = self.peers.len();
        self.active_count = self
            .peers
            .iter()
            .filter(|p| p.expire_at > now + ACTIVE_HORIZON_SECS)
            .count();
        self.peer_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer_id(tag: &str) -> PeerId {
        PeerId::new(tag.as_bytes()).unwrap()
    }

    #[test]
    fn upsert_refreshes_same_identity_in_place() {
        let mut torrent = Torrent::default();
        torrent.upsert(Ipv4Addr::new(10, 0, 0, 1), 6881, peer_id("A"), 0, 0, 100);
        torrent.upsert(Ipv4Addr::new(10, 0, 0, 1), 6881, peer_id("A"), 5, 5, 95);

        assert_eq!(torrent.peer_count(), 1);
        assert_eq!(torrent.peers()[0].uploaded, 5);
    }

    #[test]
    fn upsert_with_differing_component_adds_a_new_peer() {
        let mut torrent = Torrent::default();
        torrent.upsert(Ipv4Addr::new(10, 0, 0, 1), 6881, peer_id("A"), 0, 0, 100);
        torrent.upsert(Ipv4Addr::new(10, 0, 0, 2), 6881, peer_id("A"), 0, 0, 100);

        assert_eq!(torrent.peer_count(), 2);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut torrent = Torrent::default();
        torrent.upsert(Ipv4Addr::new(10, 0, 0, 1), 1, peer_id("A"), 0, 0, 0);
        torrent.upsert(Ipv4Addr::new(10, 0, 0, 2), 2, peer_id("B"), 0, 0, 0);
        torrent.upsert(Ipv4Addr::new(10, 0, 0, 3), 3, peer_id("C"), 0, 0, 0);

        let ips: Vec<_> = torrent.peers().iter().map(|p| p.ip).collect();
        assert_eq!(
            ips,
            vec![Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 2), Ipv4Addr::new(10, 0, 0, 3)]
        );
    }

    #[test]
    fn sweep_removes_expired_peers_and_reports_emptiness() {
        let mut torrent = Torrent::default();
        let idx = torrent.upsert(Ipv4Addr::new(10, 0, 0, 1), 1, peer_id("A"), 0, 0, 0);
        torrent.stamp(idx, 100, 150);

        assert!(!torrent.sweep(120));
        assert_eq!(torrent.peer_count(), 1);

        assert!(torrent.sweep(200));
        assert_eq!(torrent.peer_count(), 0);
    }

    #[test]
    fn active_count_excludes_peers_inside_the_horizon() {
        let mut torrent = Torrent::default();
        let idx = torrent.upsert(Ipv4Addr::new(10, 0, 0, 1), 1, peer_id("A"), 0, 0, 0);
        torrent.stamp(idx, 100, 130); // expires in 30s, inside the 60s horizon

        torrent.sweep(100);
        assert_eq!(torrent.active_count(), 0);
    }
}
