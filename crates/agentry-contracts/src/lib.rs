//! # agentry-contracts
//!
//! Shared types, events, and error contracts for the Agentry agent runtime.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions and error types.

pub mod agent;
pub mod context;
pub mod error;
pub mod event;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use agent::{AgentProfile, AgentState, AgentStatus, Payload};
    use context::ExecutionContext;
    use error::{AgentFailure, AgentryError, Collaborator, CollaboratorError};
    use event::{AgentEvent, EventKind, LifecycleAction};

    // ── AgentStatus ──────────────────────────────────────────────────────────

    #[test]
    fn status_serializes_as_plain_string() {
        assert_eq!(serde_json::to_value(AgentStatus::Running).unwrap(), json!("running"));
        assert_eq!(
            serde_json::to_value(AgentStatus::Custom("paused".into())).unwrap(),
            json!("paused")
        );
    }

    #[test]
    fn known_status_strings_parse_to_lifecycle_variants() {
        let parsed: AgentStatus = serde_json::from_value(json!("stopped")).unwrap();
        assert_eq!(parsed, AgentStatus::Stopped);

        let custom: AgentStatus = serde_json::from_value(json!("awaiting_input")).unwrap();
        assert_eq!(custom, AgentStatus::Custom("awaiting_input".into()));
    }

    // ── AgentState ───────────────────────────────────────────────────────────

    #[test]
    fn initialized_state_is_empty() {
        let state = AgentState::initialized("a1");
        assert_eq!(state.id, "a1");
        assert_eq!(state.status, AgentStatus::Initialized);
        assert!(state.data.is_empty());
    }

    #[test]
    fn with_status_keeps_id_and_data() {
        let mut state = AgentState::initialized("a1");
        state.data.insert("progress".into(), json!(3));

        let running = state.with_status(AgentStatus::Running);
        assert_eq!(running.id, "a1");
        assert_eq!(running.status, AgentStatus::Running);
        assert_eq!(running.data.get("progress"), Some(&json!(3)));
        assert!(running.timestamp >= state.timestamp);
    }

    // ── AgentProfile ─────────────────────────────────────────────────────────

    #[test]
    fn profile_capability_membership_is_exact() {
        let profile = AgentProfile::new("a1", "Agent One", "worker", ["x", "y"]);
        assert!(profile.has_capability("x"));
        assert!(profile.has_capability("y"));
        assert!(!profile.has_capability("X"));
        assert!(!profile.has_capability("z"));
    }

    #[test]
    fn profile_keeps_duplicate_capabilities() {
        let profile = AgentProfile::new("a1", "A", "worker", ["x", "x"]);
        assert_eq!(profile.capabilities.len(), 2);
    }

    // ── AgentEvent ───────────────────────────────────────────────────────────

    #[test]
    fn lifecycle_event_carries_action_and_identity() {
        let profile = AgentProfile::new("a1", "Agent One", "worker", Vec::<String>::new());
        let event = AgentEvent::lifecycle(&profile, LifecycleAction::Started, Some("req-7"));

        assert_eq!(event.kind, EventKind::AgentLifecycle);
        assert_eq!(event.source, "a1");
        assert_eq!(event.action(), Some("agent_started"));
        assert_eq!(event.data.get("agent_id"), Some(&json!("a1")));
        assert_eq!(event.data.get("role"), Some(&json!("worker")));
        assert_eq!(event.data.get("correlation_id"), Some(&json!("req-7")));
    }

    #[test]
    fn lifecycle_event_omits_missing_correlation_id() {
        let profile = AgentProfile::new("a1", "A", "worker", Vec::<String>::new());
        let event = AgentEvent::lifecycle(&profile, LifecycleAction::Stopped, None);
        assert_eq!(event.action(), Some("agent_stopped"));
        assert!(!event.data.contains_key("correlation_id"));
    }

    #[test]
    fn custom_event_has_no_action() {
        let event = AgentEvent::new(EventKind::Custom("heartbeat".into()), "host", Payload::new());
        assert_eq!(event.action(), None);
    }

    // ── ExecutionContext ─────────────────────────────────────────────────────

    #[test]
    fn cancel_is_shared_between_clones() {
        let ctx = ExecutionContext::new();
        let clone = ctx.clone();
        assert!(!clone.is_cancelled());

        ctx.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn elapsed_deadline_counts_as_cancelled() {
        let ctx = ExecutionContext::new().with_timeout(Duration::ZERO);
        assert!(ctx.is_cancelled());
        assert_eq!(ctx.remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn context_without_deadline_never_expires() {
        let ctx = ExecutionContext::new().with_correlation_id("req-1");
        assert_eq!(ctx.correlation_id(), Some("req-1"));
        assert_eq!(ctx.remaining(), None);
        assert!(!ctx.is_cancelled());
    }

    // ── AgentryError display messages ────────────────────────────────────────

    #[test]
    fn error_already_running_display() {
        let err = AgentryError::AlreadyRunning { agent_id: "a1".into() };
        assert_eq!(err.to_string(), "agent 'a1' is already running");
    }

    #[test]
    fn error_tool_not_found_display() {
        let err = AgentryError::ToolNotFound {
            agent_id: "a1".into(),
            tool: "grep".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("grep"));
        assert!(msg.contains("a1"));
    }

    #[test]
    fn error_collaborator_failure_names_collaborator() {
        let err = AgentryError::collaborator(
            Collaborator::StateManager,
            CollaboratorError::Unavailable { reason: "connection refused".into() },
        );
        let msg = err.to_string();
        assert!(msg.contains("state manager failure"));
        assert!(msg.contains("connection refused"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn error_batch_failed_lists_every_agent() {
        let err = AgentryError::BatchFailed {
            operation: "start_all".into(),
            failures: vec![
                AgentFailure {
                    agent_id: "a1".into(),
                    error: AgentryError::AlreadyRunning { agent_id: "a1".into() },
                },
                AgentFailure {
                    agent_id: "a2".into(),
                    error: AgentryError::AlreadyRunning { agent_id: "a2".into() },
                },
            ],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("start_all failed for 2 agent(s)"));
        assert!(msg.contains("[a1]"));
        assert!(msg.contains("[a2]"));
    }

    #[test]
    fn error_config_error_display() {
        let err = AgentryError::ConfigError { reason: "duplicate id 'a1'".into() };
        let msg = err.to_string();
        assert!(msg.contains("configuration error"));
        assert!(msg.contains("duplicate id"));
    }
}
