use std::hash::{Hash, Hasher};

use super::{TooLong, MAX_OPAQUE_ID_LEN};

/// A client-chosen opaque identifier, part of a peer's identity triple.
///
/// Compared and hashed case-insensitively, same as [`super::InfoHash`] — see
/// its docs for why this isn't a fixed-width type.
#[derive(Debug, Clone)]
pub struct PeerId(Vec<u8>);

impl PeerId {
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

impl PartialEq for PeerId {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for PeerId {}

impl Hash for PeerId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in &self.0 {
            byte.to_ascii_lowercase().hash(state);
        }
    }
}

impl std::fmt::Display for PeerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compares_case_insensitively() {
        let a = PeerId::new(b"-qB0001-AbC").unwrap();
        let b = PeerId::new(b"-qB0001-abc").unwrap();
        assert_eq!(a, b);
    }
}
