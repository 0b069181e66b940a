//! Small, opaque identifiers shared across the tracker's core.
//!
//! Grounded on `torrust_tracker_primitives::info_hash`/`peer`: a newtype
//! wrapping raw bytes with a `Display`/`thiserror` conversion story. Unlike
//! that crate, `info_hash` and `peer_id` here are *not* fixed 20-byte SHA-1
//! digests — the tracker accepts whatever raw bytes a client sends, up to
//! 60 bytes, and compares them case-insensitively.

mod info_hash;
mod peer_id;

pub use info_hash::InfoHash;
pub use peer_id::PeerId;

pub const MAX_OPAQUE_ID_LEN: usize = 60;

#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("value is {len} bytes, exceeds the {MAX_OPAQUE_ID_LEN} byte limit")]
pub struct TooLong {
    pub len: usize,
}
