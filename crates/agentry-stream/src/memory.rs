//! In-memory implementation of `EventStream`.
//!
//! `InMemoryEventStream` keeps every record in a `Vec` behind a `Mutex`, so
//! one stream can be shared by all agents of a factory. Use `records()` to
//! inspect the chain and `verify_integrity()` to confirm it has not been
//! altered in memory.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use agentry_contracts::{error::CollaboratorError, event::AgentEvent};
use agentry_core::traits::EventStream;

use crate::{
    chain::{hash_record, verify_chain},
    record::StreamRecord,
};

/// The mutable interior of an `InMemoryEventStream`.
pub(crate) struct StreamState {
    /// All records appended so far, in order.
    pub(crate) records: Vec<StreamRecord>,

    /// `this_hash` of the last record, or `GENESIS_HASH` while empty.
    pub(crate) last_hash: String,
}

/// An in-memory, append-only event stream backed by a SHA-256 hash chain.
pub struct InMemoryEventStream {
    pub(crate) state: Mutex<StreamState>,
}

impl InMemoryEventStream {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StreamState {
                records: Vec::new(),
                last_hash: StreamRecord::GENESIS_HASH.to_string(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StreamState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every record in chain order.
    pub fn records(&self) -> Vec<StreamRecord> {
        self.lock().records.clone()
    }

    /// Every event in append order.
    pub fn events(&self) -> Vec<AgentEvent> {
        self.lock().records.iter().map(|r| r.event.clone()).collect()
    }

    /// Events whose `source` equals `source`, in append order.
    pub fn events_from(&self, source: &str) -> Vec<AgentEvent> {
        self.lock()
            .records
            .iter()
            .filter(|r| r.event.source == source)
            .map(|r| r.event.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().records.is_empty()
    }

    /// `this_hash` of the newest record; `GENESIS_HASH` when empty.
    pub fn head_hash(&self) -> String {
        self.lock().last_hash.clone()
    }

    /// Verify the in-memory chain. See `verify_chain`.
    pub fn verify_integrity(&self) -> bool {
        verify_chain(&self.lock().records)
    }
}

impl Default for InMemoryEventStream {
    fn default() -> Self {
        Self::new()
    }
}

impl EventStream for InMemoryEventStream {
    /// Append `event` to the chain.
    ///
    /// Fails with `Rejected` only if the event cannot be serialized for
    /// hashing; nothing is appended in that case.
    fn add_event(&self, event: &AgentEvent) -> Result<(), CollaboratorError> {
        let mut state = self.lock();

        let sequence = state.records.len() as u64;
        let prev_hash = state.last_hash.clone();
        let this_hash = hash_record(sequence, event, &prev_hash)?;

        debug!(
            sequence,
            source = %event.source,
            event_id = %event.id,
            "event appended"
        );

        state.records.push(StreamRecord {
            sequence,
            event: event.clone(),
            prev_hash,
            this_hash: this_hash.clone(),
        });
        state.last_hash = this_hash;

        Ok(())
    }
}
