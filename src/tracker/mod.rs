//! The peer registry (C1) and interval controller (C2): the process-wide,
//! single-threaded swarm database. Grounded on
//! `packages/torrent-repository`'s entry/repository split, but collapsed
//! into plain owned collections with no locking — the single-threaded
//! accept loop (spec §5) makes `RwLock`/`DashMap` unnecessary.

pub mod interval;
pub mod peer;
pub mod registry;
pub mod torrent;

pub use interval::IntervalController;
pub use peer::Peer;
pub use registry::Registry;
pub use torrent::Torrent;
