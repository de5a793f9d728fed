//! Runtime error types for the Agentry agent runtime.
//!
//! All fallible operations on agents and factories return `AgentryResult<T>`.
//! Collaborator implementations (event streams, state managers) return the
//! narrower `CollaboratorError`, which the runtime wraps with the name of the
//! collaborator that failed before handing it to the caller.

use std::fmt;

use thiserror::Error;

/// Which injected collaborator produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collaborator {
    EventStream,
    StateManager,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collaborator::EventStream => f.write_str("event stream"),
            Collaborator::StateManager => f.write_str("state manager"),
        }
    }
}

/// The error type returned by `EventStream` and `StateManager` implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    /// No entry exists for the requested key.
    #[error("no entry for '{key}'")]
    NotFound { key: String },

    /// The backend could not be reached or failed internally.
    #[error("backend unavailable: {reason}")]
    Unavailable { reason: String },

    /// The backend refused the request as malformed.
    #[error("request rejected: {reason}")]
    Rejected { reason: String },
}

/// One failed agent inside a batch operation.
#[derive(Debug)]
pub struct AgentFailure {
    pub agent_id: String,
    pub error: AgentryError,
}

/// The unified error type for the Agentry runtime.
#[derive(Debug, Error)]
pub enum AgentryError {
    /// `start` was called on an agent that is already running.
    #[error("agent '{agent_id}' is already running")]
    AlreadyRunning { agent_id: String },

    /// `stop` was called on an agent that is not running.
    #[error("agent '{agent_id}' is not running")]
    NotRunning { agent_id: String },

    /// No tool with this name is registered on the agent.
    #[error("tool '{tool}' is not registered on agent '{agent_id}'")]
    ToolNotFound { agent_id: String, tool: String },

    /// The factory registry already holds an agent with this id.
    #[error("an agent with id '{agent_id}' already exists")]
    DuplicateAgentId { agent_id: String },

    /// The factory registry holds no agent with this id.
    #[error("agent '{agent_id}' not found")]
    AgentNotFound { agent_id: String },

    /// An injected event stream or state manager failed.
    #[error("{collaborator} failure: {source}")]
    CollaboratorFailure {
        collaborator: Collaborator,
        #[source]
        source: CollaboratorError,
    },

    /// A tool implementation failed while executing.
    #[error("tool '{tool}' failed: {reason}")]
    ToolFailed { tool: String, reason: String },

    /// Arguments did not satisfy the tool's declared parameter schema.
    #[error("invalid arguments for tool '{tool}': {reason}")]
    InvalidToolArguments { tool: String, reason: String },

    /// A replacement state named a different agent than its owner.
    #[error("state belongs to agent '{found}', expected '{expected}'")]
    StateMismatch { expected: String, found: String },

    /// A best-effort batch operation failed for one or more agents.
    #[error("{operation} failed for {} agent(s): {}", .failures.len(), summarize(.failures))]
    BatchFailed {
        operation: String,
        failures: Vec<AgentFailure>,
    },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

impl AgentryError {
    /// Wrap a collaborator error with the collaborator that produced it.
    pub fn collaborator(collaborator: Collaborator, source: CollaboratorError) -> Self {
        Self::CollaboratorFailure { collaborator, source }
    }
}

fn summarize(failures: &[AgentFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("[{}] {}", f.agent_id, f.error))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience alias used throughout the Agentry crates.
pub type AgentryResult<T> = Result<T, AgentryError>;
