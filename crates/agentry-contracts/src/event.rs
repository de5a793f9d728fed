//! Events published to the event stream.
//!
//! The runtime itself only publishes `AgentLifecycle` events (one per
//! successful start or stop). `Custom` lets hosting applications push their
//! own events through the same stream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::agent::{AgentProfile, Payload};

/// Classifier for an `AgentEvent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    AgentLifecycle,
    Custom(String),
}

/// The lifecycle transition an `AgentLifecycle` event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Started,
    Stopped,
}

impl LifecycleAction {
    /// The value stored under the `action` key of the event data.
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleAction::Started => "agent_started",
            LifecycleAction::Stopped => "agent_stopped",
        }
    }
}

/// A single event appended to the event stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentEvent {
    /// Unique event id.
    pub id: uuid::Uuid,
    /// What kind of event this is.
    pub kind: EventKind,
    /// Who emitted it. For lifecycle events, the agent id.
    pub source: String,
    /// Wall-clock time the event was created (UTC).
    pub timestamp: DateTime<Utc>,
    /// Free-form body.
    pub data: Payload,
}

impl AgentEvent {
    pub fn new(kind: EventKind, source: impl Into<String>, data: Payload) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            kind,
            source: source.into(),
            timestamp: Utc::now(),
            data,
        }
    }

    /// Build the lifecycle event for `profile` undergoing `action`.
    ///
    /// Data layout: `{action, agent_id, agent_name, role}` plus
    /// `correlation_id` when one is supplied.
    pub fn lifecycle(
        profile: &AgentProfile,
        action: LifecycleAction,
        correlation_id: Option<&str>,
    ) -> Self {
        let mut data = Payload::new();
        data.insert("action".into(), Value::from(action.as_str()));
        data.insert("agent_id".into(), Value::from(profile.id.as_str()));
        data.insert("agent_name".into(), Value::from(profile.name.as_str()));
        data.insert("role".into(), Value::from(profile.role.as_str()));
        if let Some(id) = correlation_id {
            data.insert("correlation_id".into(), Value::from(id));
        }
        Self::new(EventKind::AgentLifecycle, profile.id.as_str(), data)
    }

    /// The `action` string of a lifecycle event, if present.
    pub fn action(&self) -> Option<&str> {
        self.data.get("action").and_then(Value::as_str)
    }
}
