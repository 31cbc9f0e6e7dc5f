//! Payload snapshots for provenance.
//!
//! A snapshot pins the exact payload a resolution ran against, so two
//! reports can be compared by digest without diffing dependency lists.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::payload::StaticPayload;
use crate::resolve::PayloadSource;

/// Immutable record of a payload at resolution time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadSnapshot {
    pub schema_version: String,
    pub source: PayloadSource,
    /// SHA-256 of the payload's canonical JSON.
    pub digest: String,
    /// RFC 3339 capture time.
    pub captured_at: String,
    pub payload: StaticPayload,
}

impl PayloadSnapshot {
    pub fn capture(
        payload: &StaticPayload,
        source: PayloadSource,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            schema_version: crate::PAYLOAD_SCHEMA_VERSION.to_string(),
            source,
            digest: payload_digest(payload)?,
            captured_at: chrono::Utc::now().to_rfc3339(),
            payload: payload.clone(),
        })
    }

    /// Whether the recorded digest still matches the recorded payload.
    pub fn verify(&self) -> bool {
        payload_digest(&self.payload)
            .map(|d| d == self.digest)
            .unwrap_or(false)
    }
}

/// SHA-256 hex digest of the payload's canonical JSON.
///
/// Public dependencies are a sorted set and private dependencies keep their
/// declared order, so equal payloads always serialize identically.
pub fn payload_digest(payload: &StaticPayload) -> Result<String, serde_json::Error> {
    let json = serde_json::to_vec(payload)?;
    let mut hasher = Sha256::new();
    hasher.update(&json);
    Ok(hex::encode(hasher.finalize()))
}
