//! # agentry-roster
//!
//! TOML-declared agent rosters for the Agentry runtime.
//!
//! A roster lists the agents a process creates at startup along with their
//! initial configuration. Agents are created in declaration order; ids must
//! be unique within the document.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use agentry_roster::RosterConfig;
//!
//! let roster = RosterConfig::from_file(Path::new("roster.toml"))?;
//! let agents = roster.load_into(&factory)?;
//! ```

pub mod config;
pub mod loader;

pub use config::{AgentEntry, RosterConfig, StoreSettings};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    use serde_json::json;

    use agentry_contracts::{
        agent::AgentState,
        error::{AgentryError, CollaboratorError},
        event::AgentEvent,
    };
    use agentry_core::{
        traits::{EventStream, StateManager},
        AgentFactory,
    };

    use crate::RosterConfig;

    // ── Helpers ───────────────────────────────────────────────────────────────

    struct DiscardStream;

    impl EventStream for DiscardStream {
        fn add_event(&self, _event: &AgentEvent) -> Result<(), CollaboratorError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct MapStore {
        states: Mutex<HashMap<String, AgentState>>,
    }

    impl StateManager for MapStore {
        fn get_state(&self, agent_id: &str) -> Result<AgentState, CollaboratorError> {
            self.states
                .lock()
                .unwrap()
                .get(agent_id)
                .cloned()
                .ok_or_else(|| CollaboratorError::NotFound { key: agent_id.into() })
        }

        fn update_state(&self, agent_id: &str, state: &AgentState) -> Result<(), CollaboratorError> {
            self.states.lock().unwrap().insert(agent_id.into(), state.clone());
            Ok(())
        }
    }

    fn make_factory() -> AgentFactory {
        AgentFactory::new(Arc::new(DiscardStream), Arc::new(MapStore::default()))
    }

    const ROSTER: &str = r#"
        [store]
        ttl_secs = 600

        [[agents]]
        id = "planner-1"
        name = "Planner"
        role = "planner"
        capabilities = ["plan", "delegate"]

        [agents.configuration]
        max_steps = 10
        model = "small"

        [[agents]]
        id = "coder-1"
        name = "Coder"
        role = "coder"
        capabilities = ["code"]
    "#;

    // ── Parsing ───────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_roster() {
        let roster = RosterConfig::from_toml_str(ROSTER).unwrap();

        assert_eq!(roster.agents.len(), 2);
        assert_eq!(roster.agents[0].id, "planner-1");
        assert_eq!(roster.agents[0].capabilities, vec!["plan", "delegate"]);
        assert_eq!(roster.agents[0].configuration.get("max_steps"), Some(&json!(10)));
        assert!(roster.agents[1].configuration.is_empty());
        assert_eq!(roster.store.ttl(), Some(chrono::Duration::seconds(600)));
    }

    #[test]
    fn test_empty_document_is_valid() {
        let roster = RosterConfig::from_toml_str("").unwrap();
        assert!(roster.agents.is_empty());
        assert_eq!(roster.store.ttl(), None);
    }

    #[test]
    fn test_toml_parse_error() {
        match RosterConfig::from_toml_str("this is not valid toml ][[[") {
            Err(AgentryError::ConfigError { reason }) => {
                assert!(
                    reason.contains("failed to parse roster TOML"),
                    "expected parse error message, got: {reason}"
                );
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_field() {
        let toml = r#"
            [[agents]]
            id = "a1"
            role = "worker"
        "#;
        assert!(matches!(
            RosterConfig::from_toml_str(toml),
            Err(AgentryError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected_before_creation() {
        let toml = r#"
            [[agents]]
            id = "a1"
            name = "First"
            role = "worker"

            [[agents]]
            id = "a1"
            name = "Second"
            role = "worker"
        "#;

        match RosterConfig::from_toml_str(toml) {
            Err(AgentryError::ConfigError { reason }) => {
                assert!(reason.contains("duplicate agent id 'a1'"), "got: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_id_rejected() {
        let toml = r#"
            [[agents]]
            id = ""
            name = "Nameless"
            role = "worker"
        "#;
        assert!(matches!(
            RosterConfig::from_toml_str(toml),
            Err(AgentryError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = RosterConfig::from_file(std::path::Path::new("/nonexistent/roster.toml"));
        match result {
            Err(AgentryError::ConfigError { reason }) => {
                assert!(reason.contains("failed to read roster file"));
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    // ── Loading ───────────────────────────────────────────────────────────────

    #[test]
    fn test_load_into_creates_and_configures() {
        let roster = RosterConfig::from_toml_str(ROSTER).unwrap();
        let factory = make_factory();

        let agents = roster.load_into(&factory).unwrap();

        assert_eq!(agents.len(), 2);
        assert_eq!(factory.len(), 2);

        let planner = factory.get_agent("planner-1").unwrap();
        assert_eq!(planner.role(), "planner");
        assert!(planner.has_capability("delegate"));
        assert_eq!(planner.configuration().get("model"), Some(&json!("small")));

        assert_eq!(factory.agents_by_capability("code").len(), 1);
    }

    #[test]
    fn test_load_into_stops_at_existing_id() {
        let roster = RosterConfig::from_toml_str(ROSTER).unwrap();
        let factory = make_factory();
        factory.create_agent("coder-1", "Existing", "coder", ["code"]).unwrap();

        assert!(matches!(
            roster.load_into(&factory),
            Err(AgentryError::DuplicateAgentId { .. })
        ));
        // planner-1 was created before the clash.
        assert!(factory.get_agent("planner-1").is_ok());
        assert_eq!(factory.get_agent("coder-1").unwrap().name(), "Existing");
    }

    #[test]
    fn test_unrepresentable_ttl_means_no_expiry() {
        let toml = r#"
            [store]
            ttl_secs = 10000000000000
        "#;
        let roster = RosterConfig::from_toml_str(toml).unwrap();
        assert_eq!(roster.store.ttl(), None);

        let overflow = RosterConfig::from_toml_str("[store]\nttl_secs = 9223372036854775807").unwrap();
        assert_eq!(overflow.store.ttl(), None);
    }
}
