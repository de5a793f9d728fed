//! Hash-chain primitives: hashing and chain integrity verification.
//!
//! Hash input layout (bytes, in order):
//!   1. sequence as 8-byte little-endian
//!   2. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   3. canonical JSON of the event (serde_json, no pretty-printing)

use sha2::{Digest, Sha256};

use agentry_contracts::{
    error::CollaboratorError,
    event::AgentEvent,
};

use crate::record::StreamRecord;

/// Compute the SHA-256 hash for one stream record.
///
/// Returns a lowercase 64-character hex string, or `Rejected` if the event
/// cannot be serialized.
pub fn hash_record(
    sequence: u64,
    event: &AgentEvent,
    prev_hash: &str,
) -> Result<String, CollaboratorError> {
    let event_json = serde_json::to_vec(event).map_err(|e| CollaboratorError::Rejected {
        reason: format!("event is not serializable: {e}"),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&event_json);

    Ok(hex::encode(hasher.finalize()))
}

/// Verify the integrity of a chain of records.
///
/// Valid when every record's `sequence` equals its position, its `prev_hash`
/// equals the previous record's `this_hash` (or `GENESIS_HASH` first), and
/// its `this_hash` matches the recomputed value. An empty chain is valid.
pub fn verify_chain(records: &[StreamRecord]) -> bool {
    let mut expected_prev: &str = StreamRecord::GENESIS_HASH;

    for (position, record) in records.iter().enumerate() {
        if record.sequence != position as u64 || record.prev_hash != expected_prev {
            return false;
        }

        match hash_record(record.sequence, &record.event, &record.prev_hash) {
            Ok(recomputed) if recomputed == record.this_hash => {}
            _ => return false,
        }

        expected_prev = &record.this_hash;
    }

    true
}
