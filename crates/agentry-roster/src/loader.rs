//! Roster parsing, validation and factory population.

use std::{collections::HashSet, path::Path, sync::Arc};

use tracing::{debug, info};

use agentry_contracts::error::{AgentryError, AgentryResult};
use agentry_core::{Agent, AgentFactory};

use crate::config::RosterConfig;

impl RosterConfig {
    /// Parse `s` as TOML and validate the result.
    ///
    /// Returns `AgentryError::ConfigError` if the TOML is malformed, does not
    /// match the roster schema, or fails `validate()`.
    pub fn from_toml_str(s: &str) -> AgentryResult<Self> {
        let config: RosterConfig = toml::from_str(s).map_err(|e| AgentryError::ConfigError {
            reason: format!("failed to parse roster TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file at `path` and parse it as a roster.
    pub fn from_file(path: &Path) -> AgentryResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| AgentryError::ConfigError {
            reason: format!("failed to read roster file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Reject empty and repeated agent ids.
    pub fn validate(&self) -> AgentryResult<()> {
        let mut seen = HashSet::new();
        for entry in &self.agents {
            if entry.id.is_empty() {
                return Err(AgentryError::ConfigError {
                    reason: format!("agent '{}' has an empty id", entry.name),
                });
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(AgentryError::ConfigError {
                    reason: format!("duplicate agent id '{}' in roster", entry.id),
                });
            }
        }
        Ok(())
    }

    /// Create every declared agent in `factory`, in declaration order, and
    /// merge each agent's configuration.
    ///
    /// Stops at the first agent that cannot be created; agents created
    /// before it stay registered.
    pub fn load_into(&self, factory: &AgentFactory) -> AgentryResult<Vec<Arc<Agent>>> {
        let mut created = Vec::with_capacity(self.agents.len());
        for entry in &self.agents {
            let agent = factory.create_from_profile(entry.profile())?;
            if !entry.configuration.is_empty() {
                agent.update_configuration(entry.configuration.clone());
            }
            debug!(agent_id = %entry.id, keys = entry.configuration.len(), "roster agent loaded");
            created.push(agent);
        }
        info!(count = created.len(), "roster loaded");
        Ok(created)
    }
}
