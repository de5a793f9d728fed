//! Stream record type.
//!
//! `StreamRecord` wraps an `AgentEvent` with its position in the stream and
//! the SHA-256 hashes that link it to its predecessor.

use serde::{Deserialize, Serialize};

use agentry_contracts::event::AgentEvent;

/// A single entry in the event stream's hash chain.
///
/// Modifying any field, including those of the embedded `event`, invalidates
/// `this_hash` and every later `prev_hash`, which `verify_chain` detects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamRecord {
    /// Position in the stream, starting at 0.
    pub sequence: u64,

    /// The appended event.
    pub event: AgentEvent,

    /// `this_hash` of the previous record, or `GENESIS_HASH` for the first.
    pub prev_hash: String,

    /// SHA-256 (hex) over (sequence, prev_hash, canonical JSON of event).
    pub this_hash: String,
}

impl StreamRecord {
    /// The `prev_hash` of the first record in every stream: 64 hex zeros.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}
