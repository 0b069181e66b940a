use std::collections::HashMap;
use std::net::Ipv4Addr;

use super::interval::{self, IntervalController};
use super::torrent::Torrent;
use crate::primitives::{InfoHash, PeerId};

/// The process-wide collection of torrents (C1), keyed case-insensitively
/// by info hash. Grounded on `packages/torrent-repository`'s repository
/// trait, minus the lock: the single-threaded accept loop (spec §5) owns
/// this exclusively and never shares it across a suspension point.
#[derive(Debug, Default)]
pub struct Registry {
    torrents: HashMap<InfoHash, Torrent>,
    interval: IntervalController,
}

impl Registry {
    /// Case-insensitive lookup; inserts an empty torrent if absent.
    pub fn find_or_create(&mut self, info_hash: &InfoHash) -> &mut Torrent {
        self.torrents.entry(info_hash.clone()).or_default()
    }

    /// Inserts or refreshes a peer's entry in the named torrent, recomputes
    /// the global interval from the torrent's now-updated counters, and
    /// stamps the peer's `last_update`/`expire_at` (spec §4.1).
    pub fn upsert(
        &mut self,
        info_hash: &InfoHash,
        ip: Ipv4Addr,
        port: u16,
        peer_id: PeerId,
        uploaded: u64,
        downloaded: u64,
        left: u64,
        now: u64,
    ) -> u64 {
        let torrent = self.find_or_create(info_hash);
        let index = torrent.upsert(ip, port, peer_id, uploaded, downloaded, left);

        let interval = self.interval.recompute(torrent.peer_count(), torrent.active_count());
        let offset = interval::expire_offset(interval);
        torrent.stamp(index, now, now + offset);

        interval
    }

    /// Other peers in `info_hash`'s swarm, excluding the one matching
    /// `(ip, port, peer_id)` — the peer this announce is about.
    #[must_use]
    pub fn peers_excluding<'a>(&'a self, info_hash: &InfoHash, ip: Ipv4Addr, port: u16, peer_id: &PeerId) -> Vec<&'a super::Peer> {
        self.torrents
            .get(info_hash)
            .map(|torrent| torrent.peers_excluding(ip, port, peer_id).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn current_interval(&self) -> u64 {
        self.interval.current()
    }

    /// Expires stale peers across every torrent and drops any torrent left
    /// with no peers. Run once per request, before dispatch (spec §4.1).
    pub fn sweep(&mut self, now: u64) {
        self.torrents.retain(|_, torrent| !torrent.sweep(now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer_id(tag: &str) -> PeerId {
        PeerId::new(tag.as_bytes()).unwrap()
    }

    fn info_hash(tag: &str) -> InfoHash {
        InfoHash::new(tag.as_bytes()).unwrap()
    }

    #[test]
    fn self_exclusion_never_lists_the_announcing_peer() {
        let mut registry = Registry::default();
        let hash = info_hash("HASH1");
        let ip = Ipv4Addr::new(10, 0, 0, 1);

        registry.upsert(&hash, ip, 6881, peer_id("A"), 0, 0, 0, 1_000);

        let peers = registry.peers_excluding(&hash, ip, 6881, &peer_id("A"));
        assert!(peers.is_empty());
    }

    #[test]
    fn second_peer_sees_the_first() {
        let mut registry = Registry::default();
        let hash = info_hash("HASH1");

        registry.upsert(&hash, Ipv4Addr::new(10, 0, 0, 1), 6881, peer_id("A"), 0, 0, 0, 1_000);
        registry.upsert(&hash, Ipv4Addr::new(10, 0, 0, 2), 6882, peer_id("B"), 0, 0, 0, 1_000);

        let peers = registry.peers_excluding(&hash, Ipv4Addr::new(10, 0, 0, 2), 6882, &peer_id("B"));
        assert_eq!(peers.len(), 1);
        assert_eq!(peers[0].ip, Ipv4Addr::new(10, 0, 0, 1));
    }

    #[test]
    fn interval_floor_holds_for_small_swarms() {
        let mut registry = Registry::default();
        let hash = info_hash("HASH1");
        let interval = registry.upsert(&hash, Ipv4Addr::new(10, 0, 0, 1), 1, peer_id("A"), 0, 0, 0, 0);
        assert_eq!(interval, interval::MIN_ANNOUNCE_INTERVAL);
    }

    #[test]
    fn empty_torrent_collapses_and_a_later_announce_starts_fresh() {
        let mut registry = Registry::default();
        let hash = info_hash("HASH1");

        registry.upsert(&hash, Ipv4Addr::new(10, 0, 0, 1), 1, peer_id("A"), 0, 0, 0, 0);
        registry.sweep(10_000_000); // long past any reasonable expiry

        assert!(registry.torrents.get(&hash).is_none());

        registry.upsert(&hash, Ipv4Addr::new(10, 0, 0, 1), 1, peer_id("A"), 0, 0, 0, 10_000_000);
        let torrent = registry.torrents.get(&hash).unwrap();
        assert_eq!(torrent.peer_count(), 1);
    }
}
