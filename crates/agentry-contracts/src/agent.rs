//! Agent identity and state types.
//!
//! These types describe what the runtime knows about an agent. They carry no
//! behavior; `agentry-core` owns the lifecycle rules that mutate them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An open string-keyed JSON object.
///
/// Used for tool arguments and results, agent configuration, state data and
/// event data. The runtime never inspects the values.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// The lifecycle status recorded in an `AgentState`.
///
/// Lifecycle operations only ever produce `Initialized`, `Running` and
/// `Stopped`. Callers may record any other status through a state update;
/// those round-trip as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AgentStatus {
    Initialized,
    Running,
    Stopped,
    Custom(String),
}

impl AgentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AgentStatus::Initialized => "initialized",
            AgentStatus::Running => "running",
            AgentStatus::Stopped => "stopped",
            AgentStatus::Custom(s) => s,
        }
    }
}

impl From<String> for AgentStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "initialized" => AgentStatus::Initialized,
            "running" => AgentStatus::Running,
            "stopped" => AgentStatus::Stopped,
            _ => AgentStatus::Custom(s),
        }
    }
}

impl From<&str> for AgentStatus {
    fn from(s: &str) -> Self {
        AgentStatus::from(s.to_string())
    }
}

impl From<AgentStatus> for String {
    fn from(status: AgentStatus) -> Self {
        match status {
            AgentStatus::Custom(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A snapshot of an agent's lifecycle status and free-form data.
///
/// States are replaced wholesale on update, never merged. `id` always names
/// the agent that owns the state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    /// Id of the owning agent.
    pub id: String,
    /// Current lifecycle status.
    pub status: AgentStatus,
    /// Wall-clock time of the last mutation (UTC).
    pub timestamp: DateTime<Utc>,
    /// Arbitrary agent data, e.g. progress counters.
    pub data: Payload,
}

impl AgentState {
    /// The state every agent starts with: `initialized`, empty data.
    pub fn initialized(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: AgentStatus::Initialized,
            timestamp: Utc::now(),
            data: Payload::new(),
        }
    }

    /// Copy of this state with a new status and a fresh timestamp.
    pub fn with_status(&self, status: AgentStatus) -> Self {
        Self {
            status,
            timestamp: Utc::now(),
            ..self.clone()
        }
    }
}

/// The immutable identity of an agent.
///
/// `capabilities` is a list with membership semantics; duplicates are kept
/// as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Unique within one factory registry.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Classification used for factory filtering (e.g. "planner").
    pub role: String,
    /// Capability tags (e.g. "code:write", "web:search").
    #[serde(default)]
    pub capabilities: Vec<String>,
}

impl AgentProfile {
    pub fn new<I, S>(
        id: impl Into<String>,
        name: impl Into<String>,
        role: impl Into<String>,
        capabilities: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            role: role.into(),
            capabilities: capabilities.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact string membership test against `capabilities`.
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}
