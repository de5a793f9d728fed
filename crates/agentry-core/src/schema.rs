//! JSON Schema validation of tool arguments.

use serde_json::Value;
use tracing::warn;

use agentry_contracts::{
    agent::Payload,
    error::{AgentryError, AgentryResult},
};

/// Validate `args` against the parameter `schema` declared by `tool`.
///
/// All violations are collected into one `InvalidToolArguments` error so the
/// caller sees the full set at once. A schema that does not compile is
/// reported the same way.
pub fn validate_arguments(tool: &str, schema: &Value, args: &Payload) -> AgentryResult<()> {
    let validator = jsonschema::validator_for(schema).map_err(|e| {
        warn!(tool = %tool, error = %e, "tool declares an invalid parameter schema");
        AgentryError::InvalidToolArguments {
            tool: tool.to_string(),
            reason: format!("invalid JSON Schema document: {e}"),
        }
    })?;

    let instance = Value::Object(args.clone());
    let violations: Vec<String> = validator
        .iter_errors(&instance)
        .map(|e| format!("{} at '{}'", e, e.instance_path))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(AgentryError::InvalidToolArguments {
            tool: tool.to_string(),
            reason: violations.join("; "),
        })
    }
}
