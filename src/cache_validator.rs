use sha2::{Digest, Sha256};

use crate::models::CompanyScoresResponse;

/// Validates cached score payloads using SHA-256 checksums
///
/// Score reads are served from an in-process cache; entries carry a checksum
/// computed at insert time and are re-validated on retrieval. An entry that
/// fails validation is discarded and the read falls back to the database.

/// Wrapper for a cached score payload with integrity validation
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ValidatedScoresEntry {
    /// Serialized `CompanyScoresResponse` JSON
    pub data: String,
    /// SHA-256 checksum of the data (hex encoded)
    pub checksum: String,
}

impl ValidatedScoresEntry {
    /// Creates a cache entry from a scores response, with computed checksum.
    pub fn from_response(response: &CompanyScoresResponse) -> Option<Self> {
        let data = serde_json::to_string(response).ok()?;
        let checksum = Self::compute_checksum(&data);
        Some(Self { data, checksum })
    }

    /// Computes SHA-256 checksum of the data
    fn compute_checksum(data: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Validates the integrity of the cached data
    ///
    /// Returns true if the checksum matches, false if tampered
    pub fn is_valid(&self) -> bool {
        let computed = Self::compute_checksum(&self.data);
        computed == self.checksum
    }

    /// Serializes the entry for storage in cache
    pub fn serialize(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Deserializes and validates a cache entry, decoding the payload.
    ///
    /// Returns None if the entry is corrupted, tampered with, or no longer
    /// decodes as a scores response — callers refetch from the database.
    pub fn deserialize_and_validate(serialized: &str) -> Option<String> {
        let entry: ValidatedScoresEntry = serde_json::from_str(serialized).ok()?;

        if entry.is_valid() {
            Some(entry.data)
        } else {
            // Checksum mismatch - cache entry corrupted
            tracing::warn!(
                "Score cache validation failed: checksum mismatch. Expected: {}, Data length: {}",
                entry.checksum,
                entry.data.len()
            );
            None
        }
    }
}
