//! Question fingerprints used as cache filename stems.

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the SHA-256 digest.
pub const FINGERPRINT_LEN: usize = 8;

/// First [`FINGERPRINT_LEN`] hex characters of SHA-256 over the raw question bytes.
///
/// No trimming or case folding happens here, so `"q"` and `"q "` differ.
pub fn fingerprint(question: &str) -> String {
    let digest = Sha256::digest(question.as_bytes());
    let mut key = hex::encode(digest);
    key.truncate(FINGERPRINT_LEN);
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_known_digests() {
        assert_eq!(fingerprint(""), "e3b0c442");
        assert_eq!(fingerprint("abc"), "ba7816bf");
    }

    #[test]
    fn test_fingerprint_stability() {
        assert_eq!(fingerprint("capital of France"), fingerprint("capital of France"));
    }

    #[test]
    fn test_fingerprint_byte_sensitive() {
        assert_ne!(fingerprint("capital of France"), fingerprint("capital of France "));
        assert_ne!(fingerprint("Capital of France"), fingerprint("capital of France"));
    }

    #[test]
    fn test_fingerprint_format() {
        let key = fingerprint("what is rust?");
        assert_eq!(key.len(), FINGERPRINT_LEN);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
