//! The in-memory symmetric key for a vault session.
//!
//! The key is the PBKDF2 output of the master secret, which is also the
//! stored verification hash: a successful login yields the encryption
//! key directly, with no second derivation.

use std::fmt;

use zeroize::Zeroize;

use super::kdf::KEY_LEN;

/// A wrapper around the 32-byte derived key that automatically zeroes
/// its memory when dropped.
///
/// Never persisted and never shared across processes.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Create a new `DerivedKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to pass to the cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerivedKey([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_is_redacted() {
        let key = DerivedKey::new([0x41u8; KEY_LEN]);
        let shown = format!("{key:?}");
        assert_eq!(shown, "DerivedKey([REDACTED])");
    }
}
