use std::hash::{Hash, Hasher};

use super::{TooLong, MAX_OPAQUE_ID_LEN};

/// A torrent's content fingerprint, as sent in the `info_hash` query
/// parameter.
///
/// Compared and hashed case-insensitively, matching the original tracker's
/// `strcasecmp` lookup. Modern clients send raw 20-byte SHA-1 digests, but
/// nothing here assumes that length — only the 60-byte ceiling from the
/// wire protocol.
#[derive(Debug, Clone)]
pub struct InfoHash(Vec<u8>);

impl InfoHash {
    pub fn new(bytes: &[u8]) -> Result<Self, TooLong> {
        if bytes.len() > MAX_OPAQUE_ID_LEN {
            return Err(TooLong { len: bytes.len() });
        }
        Ok(Self(bytes.to_vec()))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq for InfoHash {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for InfoHash {}

impl Hash for InfoHash {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in &self.0 {
            byte.to_ascii_lowercase().hash(state);
        }
    }
}

impl std::fmt::Display for InfoHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}
