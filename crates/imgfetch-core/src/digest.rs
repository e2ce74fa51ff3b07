//! Content fingerprints for duplicate detection.
//!
//! SHA-256 over the raw response body, as lowercase hex. Only used to tell
//! identical images apart within a session.

use sha2::{Digest, Sha256};

/// Compute SHA-256 of `bytes` and return the digest as lowercase hex.
pub fn content_digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body() {
        assert_eq!(
            content_digest(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn known_content() {
        assert_eq!(
            content_digest(b"hello\n"),
            "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03"
        );
    }

    #[test]
    fn differs_on_single_byte() {
        assert_ne!(content_digest(b"\x89PNG\x00"), content_digest(b"\x89PNG\x01"));
    }
}
