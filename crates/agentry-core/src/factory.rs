//! The agent factory: a registry of agents keyed by unique id.
//!
//! The factory owns the only strong registry references to its agents and
//! hands out `Arc<Agent>` clones. Every agent it creates shares the
//! factory's event stream and state manager.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use tracing::{debug, info, warn};

use agentry_contracts::{
    agent::AgentProfile,
    context::ExecutionContext,
    error::{AgentFailure, AgentryError, AgentryResult},
};

use crate::{
    agent::Agent,
    lock::{read, write},
    traits::{EventStream, StateManager},
};

/// Registry and constructor of agents, enforcing id uniqueness.
pub struct AgentFactory {
    agents: RwLock<HashMap<String, Arc<Agent>>>,
    events: Arc<dyn EventStream>,
    states: Arc<dyn StateManager>,
}

impl AgentFactory {
    /// Create an empty factory that injects `events` and `states` into
    /// every agent it creates.
    pub fn new(events: Arc<dyn EventStream>, states: Arc<dyn StateManager>) -> Self {
        Self {
            agents: RwLock::new(HashMap::new()),
            events,
            states,
        }
    }

    /// Create and register a new agent.
    ///
    /// # Errors
    ///
    /// - `DuplicateAgentId` if `id` is already registered.
    /// - `CollaboratorFailure` if the initial state write fails.
    ///
    /// The registry is unchanged on any error.
    pub fn create_agent<I, S>(
        &self,
        id: impl Into<String>,
        name: impl Into<String>,
        role: impl Into<String>,
        capabilities: I,
    ) -> AgentryResult<Arc<Agent>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.create_from_profile(AgentProfile::new(id, name, role, capabilities))
    }

    /// Create and register an agent from a prepared profile.
    ///
    /// The registry write lock is held across the uniqueness check,
    /// construction and insertion, so concurrent calls with one id admit
    /// exactly one agent. Construction writes the initial state, so lookups
    /// wait on that store round-trip while a create is in flight.
    pub fn create_from_profile(&self, profile: AgentProfile) -> AgentryResult<Arc<Agent>> {
        let mut agents = write(&self.agents);
        if agents.contains_key(&profile.id) {
            warn!(agent_id = %profile.id, "rejected duplicate agent id");
            return Err(AgentryError::DuplicateAgentId { agent_id: profile.id });
        }

        let agent = Arc::new(Agent::new(profile, self.events.clone(), self.states.clone())?);
        agents.insert(agent.id().to_string(), agent.clone());

        info!(
            agent_id = %agent.id(),
            role = %agent.role(),
            registered = agents.len(),
            "agent created"
        );
        Ok(agent)
    }

    /// Look up an agent by id.
    pub fn get_agent(&self, id: &str) -> AgentryResult<Arc<Agent>> {
        read(&self.agents)
            .get(id)
            .cloned()
            .ok_or_else(|| AgentryError::AgentNotFound { agent_id: id.to_string() })
    }

    /// Remove an agent from the registry.
    ///
    /// Running agents are not stopped; callers still holding the `Arc` keep
    /// a working agent, but the factory no longer knows about it.
    pub fn delete_agent(&self, id: &str) -> AgentryResult<()> {
        match write(&self.agents).remove(id) {
            Some(_) => {
                info!(agent_id = %id, "agent deleted");
                Ok(())
            }
            None => Err(AgentryError::AgentNotFound { agent_id: id.to_string() }),
        }
    }

    /// Every registered agent, sorted by id.
    pub fn list_agents(&self) -> Vec<Arc<Agent>> {
        self.select(|_| true)
    }

    /// Agents whose role equals `role` exactly.
    pub fn agents_by_role(&self, role: &str) -> Vec<Arc<Agent>> {
        self.select(|a| a.role() == role)
    }

    /// Agents holding `capability`.
    pub fn agents_by_capability(&self, capability: &str) -> Vec<Arc<Agent>> {
        self.select(|a| a.has_capability(capability))
    }

    pub fn len(&self) -> usize {
        read(&self.agents).len()
    }

    pub fn is_empty(&self) -> bool {
        read(&self.agents).is_empty()
    }

    fn select(&self, keep: impl Fn(&Agent) -> bool) -> Vec<Arc<Agent>> {
        let mut selected: Vec<Arc<Agent>> = read(&self.agents)
            .values()
            .filter(|a| keep(a))
            .cloned()
            .collect();
        selected.sort_by(|a, b| a.id().cmp(b.id()));
        selected
    }

    // ── Batch operations ─────────────────────────────────────────────────────

    /// Start every registered agent, best effort.
    ///
    /// Every agent is attempted even when earlier ones fail. Each failure is
    /// logged and collected.
    ///
    /// # Errors
    ///
    /// `BatchFailed` listing each agent that failed to start, including those
    /// that were already running.
    pub fn start_all(&self, ctx: &ExecutionContext) -> AgentryResult<()> {
        Self::for_each_collecting("start_all", self.list_agents(), |agent| agent.start(ctx))
    }

    /// Stop every registered agent, best effort. See `start_all`.
    pub fn stop_all(&self) -> AgentryResult<()> {
        Self::for_each_collecting("stop_all", self.list_agents(), Agent::stop)
    }

    /// Stop every running agent, then empty the registry.
    ///
    /// Agents that are not running are skipped rather than reported. The
    /// registry is cleared even when some stops fail.
    ///
    /// # Errors
    ///
    /// `BatchFailed` listing each running agent that failed to stop.
    pub fn shutdown(&self) -> AgentryResult<()> {
        let running: Vec<Arc<Agent>> = self.select(Agent::is_running);
        let result = Self::for_each_collecting("shutdown", running, Agent::stop);

        let removed = {
            let mut agents = write(&self.agents);
            let n = agents.len();
            agents.clear();
            n
        };
        info!(removed, "agent factory shut down");
        result
    }

    fn for_each_collecting(
        operation: &str,
        agents: Vec<Arc<Agent>>,
        op: impl Fn(&Agent) -> AgentryResult<()>,
    ) -> AgentryResult<()> {
        let total = agents.len();
        let mut failures = Vec::new();

        for agent in agents {
            match op(&agent) {
                Ok(()) => debug!(agent_id = %agent.id(), operation, "batch item succeeded"),
                Err(error) => {
                    warn!(agent_id = %agent.id(), operation, error = %error, "batch item failed");
                    failures.push(AgentFailure {
                        agent_id: agent.id().to_string(),
                        error,
                    });
                }
            }
        }

        if failures.is_empty() {
            info!(operation, total, "batch operation completed");
            Ok(())
        } else {
            Err(AgentryError::BatchFailed {
                operation: operation.to_string(),
                failures,
            })
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
