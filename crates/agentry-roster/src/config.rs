//! Roster configuration schema.
//!
//! A `RosterConfig` is deserialized from TOML. It names the agents to create
//! at startup, in declaration order, and carries store settings for the
//! hosting process.

use serde::{Deserialize, Serialize};

use agentry_contracts::agent::{AgentProfile, Payload};

/// One agent declared in the roster.
///
/// Example in TOML:
/// ```toml
/// [[agents]]
/// id = "planner-1"
/// name = "Planner"
/// role = "planner"
/// capabilities = ["plan", "delegate"]
///
/// [agents.configuration]
/// max_steps = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentEntry {
    pub id: String,
    pub name: String,
    pub role: String,

    #[serde(default)]
    pub capabilities: Vec<String>,

    /// Merged into the agent's configuration right after creation.
    #[serde(default)]
    pub configuration: Payload,
}

impl AgentEntry {
    pub fn profile(&self) -> AgentProfile {
        AgentProfile::new(
            self.id.as_str(),
            self.name.as_str(),
            self.role.as_str(),
            self.capabilities.iter().map(String::as_str),
        )
    }
}

/// Settings for the hosting process's state store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Seconds a stored state stays visible after its last write.
    /// Absent means entries never expire.
    pub ttl_secs: Option<u64>,
}

impl StoreSettings {
    /// The configured TTL as a `chrono::Duration`, if any.
    ///
    /// Values whose expiry instant cannot be represented are treated as
    /// no expiry.
    pub fn ttl(&self) -> Option<chrono::Duration> {
        self.ttl_secs
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(chrono::Duration::try_seconds)
            .filter(|ttl| chrono::Utc::now().checked_add_signed(*ttl).is_some())
    }
}

/// The top-level structure deserialized from a roster TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub store: StoreSettings,

    /// Agents in creation order.
    #[serde(default)]
    pub agents: Vec<AgentEntry>,
}
