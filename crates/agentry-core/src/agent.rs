//! The agent: lifecycle state machine, tool registry and configuration.
//!
//! An agent moves between `initialized`, `running` and `stopped`:
//!
//!   new ─► initialized ─start─► running ─stop─► stopped ─start─► running …
//!
//! Every transition is persisted through the `StateManager` before it takes
//! effect in memory, and announced on the `EventStream` afterwards. The
//! running check and the transition happen under one write lock, so two
//! concurrent `start` calls can never both succeed.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, RwLock},
};

use tracing::{debug, info, warn};

use agentry_contracts::{
    agent::{AgentProfile, AgentState, AgentStatus, Payload},
    context::ExecutionContext,
    error::{AgentryError, AgentryResult, Collaborator},
    event::{AgentEvent, LifecycleAction},
};

use crate::{
    lock::{read, write},
    schema::validate_arguments,
    traits::{EventStream, StateManager, Tool},
};

/// The lifecycle guard and the state snapshot it governs.
struct Lifecycle {
    state: AgentState,
    running: bool,
}

/// A single orchestrated agent.
///
/// Identity (`id`, `name`, `role`, `capabilities`) is fixed at construction.
/// Tools, configuration and state are interior-mutable behind their own
/// reader/writer locks, so an `Arc<Agent>` can be driven from many threads.
pub struct Agent {
    profile: AgentProfile,
    lifecycle: RwLock<Lifecycle>,
    tools: RwLock<HashMap<String, Arc<dyn Tool>>>,
    configuration: RwLock<Payload>,
    events: Arc<dyn EventStream>,
    states: Arc<dyn StateManager>,
}

impl Agent {
    /// Create an agent and persist its initial `initialized` state.
    ///
    /// # Errors
    ///
    /// Returns `CollaboratorFailure` if the state manager rejects the initial
    /// write. No agent is returned in that case.
    pub fn new(
        profile: AgentProfile,
        events: Arc<dyn EventStream>,
        states: Arc<dyn StateManager>,
    ) -> AgentryResult<Self> {
        if profile.id.is_empty() {
            warn!(name = %profile.name, "creating agent with an empty id");
        }

        let state = AgentState::initialized(profile.id.as_str());
        states
            .update_state(&profile.id, &state)
            .map_err(|e| AgentryError::collaborator(Collaborator::StateManager, e))?;

        debug!(
            agent_id = %profile.id,
            role = %profile.role,
            capabilities = ?profile.capabilities,
            "agent initialized"
        );

        Ok(Self {
            profile,
            lifecycle: RwLock::new(Lifecycle { state, running: false }),
            tools: RwLock::new(HashMap::new()),
            configuration: RwLock::new(Payload::new()),
            events,
            states,
        })
    }

    pub fn id(&self) -> &str {
        &self.profile.id
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn role(&self) -> &str {
        &self.profile.role
    }

    pub fn capabilities(&self) -> &[String] {
        &self.profile.capabilities
    }

    pub fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    /// Exact membership test against the capabilities given at construction.
    pub fn has_capability(&self, capability: &str) -> bool {
        self.profile.has_capability(capability)
    }

    /// True between a successful `start` and the next successful `stop`.
    ///
    /// Custom statuses written through `update_state` do not affect this.
    pub fn is_running(&self) -> bool {
        read(&self.lifecycle).running
    }

    // ── Lifecycle ────────────────────────────────────────────────────────────

    /// Transition to `running`.
    ///
    /// On success exactly one state write and one `agent_started` event have
    /// been performed. The context's correlation id, if any, is recorded on
    /// the event.
    ///
    /// # Errors
    ///
    /// - `AlreadyRunning` if the agent is running (no side effects).
    /// - `CollaboratorFailure` from the state manager; the agent stays stopped.
    /// - `CollaboratorFailure` from the event stream; the state write already
    ///   happened, so the agent is running.
    pub fn start(&self, ctx: &ExecutionContext) -> AgentryResult<()> {
        let mut lifecycle = write(&self.lifecycle);
        if lifecycle.running {
            warn!(agent_id = %self.profile.id, "start rejected: agent already running");
            return Err(AgentryError::AlreadyRunning {
                agent_id: self.profile.id.clone(),
            });
        }
        self.transition(
            &mut lifecycle,
            AgentStatus::Running,
            LifecycleAction::Started,
            ctx.correlation_id(),
        )
    }

    /// Transition to `stopped`. Mirror image of `start`.
    ///
    /// # Errors
    ///
    /// `NotRunning` if the agent is not running, otherwise the same
    /// collaborator failures as `start`.
    pub fn stop(&self) -> AgentryResult<()> {
        let mut lifecycle = write(&self.lifecycle);
        if !lifecycle.running {
            warn!(agent_id = %self.profile.id, "stop rejected: agent not running");
            return Err(AgentryError::NotRunning {
                agent_id: self.profile.id.clone(),
            });
        }
        self.transition(&mut lifecycle, AgentStatus::Stopped, LifecycleAction::Stopped, None)
    }

    fn transition(
        &self,
        lifecycle: &mut Lifecycle,
        status: AgentStatus,
        action: LifecycleAction,
        correlation_id: Option<&str>,
    ) -> AgentryResult<()> {
        let next = lifecycle.state.with_status(status);
        self.persist(&next)?;

        lifecycle.state = next;
        lifecycle.running = action == LifecycleAction::Started;

        let event = AgentEvent::lifecycle(&self.profile, action, correlation_id);
        self.events
            .add_event(&event)
            .map_err(|e| AgentryError::collaborator(Collaborator::EventStream, e))?;

        info!(
            agent_id = %self.profile.id,
            action = action.as_str(),
            event_id = %event.id,
            "agent lifecycle transition"
        );
        Ok(())
    }

    fn persist(&self, state: &AgentState) -> AgentryResult<()> {
        self.states
            .update_state(&self.profile.id, state)
            .map_err(|e| AgentryError::collaborator(Collaborator::StateManager, e))
    }

    // ── State ────────────────────────────────────────────────────────────────

    /// A copy of the current state snapshot.
    pub fn state(&self) -> AgentState {
        read(&self.lifecycle).state.clone()
    }

    /// Replace the state wholesale and persist it. No event is emitted.
    ///
    /// # Errors
    ///
    /// - `StateMismatch` if `new_state.id` is not this agent's id.
    /// - `CollaboratorFailure` if the write fails; the old state is kept.
    pub fn update_state(&self, new_state: AgentState) -> AgentryResult<()> {
        if new_state.id != self.profile.id {
            return Err(AgentryError::StateMismatch {
                expected: self.profile.id.clone(),
                found: new_state.id,
            });
        }

        let mut lifecycle = write(&self.lifecycle);
        self.persist(&new_state)?;
        debug!(agent_id = %self.profile.id, status = %new_state.status, "agent state replaced");
        lifecycle.state = new_state;
        Ok(())
    }

    /// Read this agent's state back from the state manager.
    pub fn persisted_state(&self) -> AgentryResult<AgentState> {
        self.states
            .get_state(&self.profile.id)
            .map_err(|e| AgentryError::collaborator(Collaborator::StateManager, e))
    }

    // ── Configuration ────────────────────────────────────────────────────────

    /// Merge `updates` into the configuration key by key.
    ///
    /// Existing keys are overwritten, new keys added, absent keys untouched.
    pub fn update_configuration(&self, updates: Payload) {
        let mut configuration = write(&self.configuration);
        for (key, value) in updates {
            configuration.insert(key, value);
        }
    }

    /// A copy of the current configuration.
    pub fn configuration(&self) -> Payload {
        read(&self.configuration).clone()
    }

    // ── Tools ────────────────────────────────────────────────────────────────

    /// Register `tool` under its name. A tool already registered under the
    /// same name is replaced.
    pub fn add_tool(&self, tool: impl Tool + 'static) {
        self.add_shared_tool(Arc::new(tool));
    }

    /// Register an already shared tool handle.
    pub fn add_shared_tool(&self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        let replaced = write(&self.tools).insert(name.clone(), tool).is_some();
        debug!(agent_id = %self.profile.id, tool = %name, replaced, "tool registered");
    }

    /// Every registered tool, in no particular order.
    pub fn tools(&self) -> Vec<Arc<dyn Tool>> {
        read(&self.tools).values().cloned().collect()
    }

    /// Names of every registered tool, sorted.
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = read(&self.tools).keys().cloned().collect();
        names.sort();
        names
    }

    /// Run the tool registered as `name` with `args`.
    ///
    /// The tool runs without any agent lock held and with no timeout; its
    /// result or error is returned verbatim. No event is emitted and no state
    /// is touched.
    ///
    /// # Errors
    ///
    /// - `ToolNotFound` if no tool has that name.
    /// - `InvalidToolArguments` if the tool declares a parameter schema that
    ///   `args` violates; the tool is not invoked.
    /// - Whatever the tool itself returns.
    pub fn execute_tool(
        &self,
        ctx: &ExecutionContext,
        name: &str,
        args: &Payload,
    ) -> AgentryResult<Payload> {
        let tool = read(&self.tools).get(name).cloned().ok_or_else(|| {
            warn!(agent_id = %self.profile.id, tool = %name, "tool not registered");
            AgentryError::ToolNotFound {
                agent_id: self.profile.id.clone(),
                tool: name.to_string(),
            }
        })?;

        if let Some(schema) = tool.parameters_schema() {
            validate_arguments(name, &schema, args)?;
        }

        debug!(agent_id = %self.profile.id, tool = %name, "executing tool");
        tool.execute(ctx, args)
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("id", &self.profile.id)
            .field("name", &self.profile.name)
            .field("role", &self.profile.role)
            .field("capabilities", &self.profile.capabilities)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
