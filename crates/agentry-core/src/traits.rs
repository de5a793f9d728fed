//! Trait definitions at the runtime's seams.
//!
//! - `Tool`: a third-party capability an agent can execute
//! - `EventStream`: external append-only sink for lifecycle events
//! - `StateManager`: external get/update-by-id store for agent state
//!
//! Agents hold collaborators as shared `Arc<dyn …>` handles injected by the
//! caller and never close them. Implementations must be thread-safe: the
//! runtime calls them from whichever thread drives the agent.

use serde_json::Value;

use agentry_contracts::{
    agent::{AgentState, Payload},
    context::ExecutionContext,
    error::{AgentryResult, CollaboratorError},
    event::AgentEvent,
};

/// A named unit of work an agent can invoke with arbitrary arguments.
///
/// Tools are owned by the agent they are registered on. The runtime adds no
/// timeout or retry around `execute`; long-running tools should watch
/// `ctx.is_cancelled()`.
pub trait Tool: Send + Sync {
    /// Unique within one agent's tool set.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// Optional JSON Schema the arguments must satisfy.
    ///
    /// When `Some`, the agent validates arguments before calling `execute`
    /// and rejects invalid calls without invoking the tool.
    fn parameters_schema(&self) -> Option<Value> {
        None
    }

    /// Run the tool. The agent returns the result or error verbatim.
    fn execute(&self, ctx: &ExecutionContext, args: &Payload) -> AgentryResult<Payload>;
}

/// The event stream contract consumed by agents.
pub trait EventStream: Send + Sync {
    /// Append one event. Implementations must treat this as append-only.
    fn add_event(&self, event: &AgentEvent) -> Result<(), CollaboratorError>;
}

/// The state persistence contract consumed by agents.
pub trait StateManager: Send + Sync {
    /// Fetch the last state written for `agent_id`.
    fn get_state(&self, agent_id: &str) -> Result<AgentState, CollaboratorError>;

    /// Store `state` as the current state of `agent_id`, replacing any prior one.
    fn update_state(&self, agent_id: &str, state: &AgentState) -> Result<(), CollaboratorError>;
}
