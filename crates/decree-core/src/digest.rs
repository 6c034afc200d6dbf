//! # Evidence Digests
//!
//! SHA-256 fingerprints of evidence payloads. Dispute records keep a
//! fixed-size digest per submission rather than a copy of the payload; the
//! payload itself travels only in the notification event, where downstream
//! audit sinks can persist it and verify it against the recorded digest.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A SHA-256 digest of an opaque evidence payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvidenceDigest(pub [u8; 32]);

impl EvidenceDigest {
    /// Compute the digest of an evidence payload.
    ///
    /// Payloads are opaque bytes; the engine never interprets them, so the
    /// digest is computed over the raw payload with no canonicalization step.
    pub fn compute(payload: &[u8]) -> Self {
        let hash = Sha256::digest(payload);
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hash);
        Self(bytes)
    }

    /// Access the raw 32-byte digest value.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for EvidenceDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_deterministic() {
        let d1 = EvidenceDigest::compute(b"exhibit A");
        let d2 = EvidenceDigest::compute(b"exhibit A");
        assert_eq!(d1, d2);
    }

    #[test]
    fn test_different_payloads_different_digests() {
        assert_ne!(
            EvidenceDigest::compute(b"exhibit A"),
            EvidenceDigest::compute(b"exhibit B")
        );
    }

    #[test]
    fn test_hex_format() {
        let hex = EvidenceDigest::compute(b"payload").to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_display_prefix() {
        let s = EvidenceDigest::compute(b"payload").to_string();
        assert!(s.starts_with("sha256:"));
        assert_eq!(s.len(), 7 + 64);
    }

    #[test]
    fn test_known_sha256_vector() {
        // SHA256 of the empty payload — verified against
        // Python hashlib.sha256(b"").hexdigest().
        assert_eq!(
            EvidenceDigest::compute(b"").to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let digest = EvidenceDigest::compute(b"exhibit A");
        let json = serde_json::to_string(&digest).unwrap();
        let parsed: EvidenceDigest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, digest);
    }
}
