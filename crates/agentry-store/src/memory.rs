//! In-memory implementation of `StateManager`.
//!
//! Entries optionally expire a fixed time-to-live after their last write,
//! mirroring the key/value-with-TTL backends this runtime is deployed
//! against. Expired entries are invisible to `get_state` immediately and
//! are dropped from memory by `purge_expired` or the next write to the key.

use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use agentry_contracts::{agent::AgentState, error::CollaboratorError};
use agentry_core::traits::StateManager;

struct Entry {
    state: AgentState,
    expires_at: Option<DateTime<Utc>>,
}

impl Entry {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

/// A thread-safe map from agent id to its last written state.
pub struct InMemoryStateManager {
    entries: RwLock<HashMap<String, Entry>>,
    ttl: Option<Duration>,
}

impl InMemoryStateManager {
    /// A store whose entries never expire.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: None,
        }
    }

    /// A store whose entries expire `ttl` after their last write.
    ///
    /// A `ttl` reaching past the latest representable instant means the
    /// entries never expire.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Some(ttl),
        }
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Number of entries that have not expired.
    pub fn len(&self) -> usize {
        let now = Utc::now();
        self.read_entries().values().filter(|e| e.is_live(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every expired entry. Returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.write_entries();
        let before = entries.len();
        entries.retain(|_, e| e.is_live(now));
        let purged = before - entries.len();
        if purged > 0 {
            debug!(purged, "expired agent states purged");
        }
        purged
    }

    /// Remove the entry for `agent_id`, returning its state if it was live.
    pub fn remove(&self, agent_id: &str) -> Option<AgentState> {
        let now = Utc::now();
        self.write_entries()
            .remove(agent_id)
            .filter(|e| e.is_live(now))
            .map(|e| e.state)
    }

    fn read_entries(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Entry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Entry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryStateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StateManager for InMemoryStateManager {
    /// Fails with `NotFound` for unknown and expired ids alike.
    fn get_state(&self, agent_id: &str) -> Result<AgentState, CollaboratorError> {
        let now = Utc::now();
        self.read_entries()
            .get(agent_id)
            .filter(|e| e.is_live(now))
            .map(|e| e.state.clone())
            .ok_or_else(|| CollaboratorError::NotFound { key: agent_id.to_string() })
    }

    /// Store `state` and restart its expiry clock.
    ///
    /// Fails with `Rejected` when `state.id` does not match `agent_id`.
    fn update_state(&self, agent_id: &str, state: &AgentState) -> Result<(), CollaboratorError> {
        if state.id != agent_id {
            return Err(CollaboratorError::Rejected {
                reason: format!("state for '{}' written under key '{}'", state.id, agent_id),
            });
        }

        // An expiry past the representable range never arrives.
        let expires_at = self.ttl.and_then(|ttl| Utc::now().checked_add_signed(ttl));
        self.write_entries().insert(
            agent_id.to_string(),
            Entry {
                state: state.clone(),
                expires_at,
            },
        );
        debug!(agent_id = %agent_id, status = %state.status, "agent state stored");
        Ok(())
    }
}
