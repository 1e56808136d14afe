//! Hashing utilities for stable object identifiers.

use sha2::{Digest, Sha256};

/// Length of an Xcode object identifier, in hex characters.
pub const OBJECT_ID_LEN: usize = 24;

/// A hasher for building identifiers from multiple components.
#[derive(Default)]
pub struct Fingerprint {
    hasher: Sha256,
}

impl Fingerprint {
    /// Create a new fingerprint builder.
    pub fn new() -> Self {
        Fingerprint {
            hasher: Sha256::new(),
        }
    }

    /// Add a string component to the fingerprint.
    pub fn update_str(&mut self, s: &str) -> &mut Self {
        self.hasher.update(s.as_bytes());
        self.hasher.update(b"\0"); // Separator
        self
    }

    /// Add a counter, used to disambiguate otherwise identical keys.
    pub fn update_u64(&mut self, n: u64) -> &mut Self {
        self.hasher.update(n.to_le_bytes());
        self
    }

    /// Finalize and return the fingerprint as a hex string.
    pub fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }

    /// Finalize into a 24 character uppercase identifier, the shape Xcode
    /// uses for object references.
    pub fn finish_object_id(self) -> String {
        self.finish()[..OBJECT_ID_LEN].to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint() {
        let fp1 = {
            let mut fp = Fingerprint::new();
            fp.update_str("PBXFileReference").update_str("/p/a.swift");
            fp.finish()
        };

        let fp2 = {
            let mut fp = Fingerprint::new();
            fp.update_str("PBXFileReference").update_str("/p/a.swift");
            fp.finish()
        };

        let fp3 = {
            let mut fp = Fingerprint::new();
            fp.update_str("PBXFileReference").update_str("/p/b.swift");
            fp.finish()
        };

        assert_eq!(fp1, fp2);
        assert_ne!(fp1, fp3);
    }

    #[test]
    fn test_object_id_shape() {
        let mut fp = Fingerprint::new();
        fp.update_str("PBXGroup").update_str("/p/Sources").update_u64(1);
        let id = fp.finish_object_id();
        assert_eq!(id.len(), OBJECT_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }
}
