//! Demo tools registered on roster agents by capability.

use serde_json::{json, Value};

use agentry_contracts::{
    agent::Payload,
    context::ExecutionContext,
    error::{AgentryError, AgentryResult},
};
use agentry_core::traits::Tool;

/// Returns `{"echo": <msg>}`.
pub struct EchoTool;

impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Echo the `msg` argument back to the caller"
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "required": ["msg"],
            "properties": { "msg": { "type": "string" } }
        }))
    }

    fn execute(&self, _ctx: &ExecutionContext, args: &Payload) -> AgentryResult<Payload> {
        let mut out = Payload::new();
        out.insert("echo".into(), args.get("msg").cloned().unwrap_or(Value::Null));
        Ok(out)
    }
}

/// Sums a numeric array, honoring cancellation between elements.
pub struct SumTool;

impl Tool for SumTool {
    fn name(&self) -> &str {
        "sum"
    }

    fn description(&self) -> &str {
        "Add up the numbers in `values`"
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "required": ["values"],
            "properties": {
                "values": { "type": "array", "items": { "type": "number" } }
            }
        }))
    }

    fn execute(&self, ctx: &ExecutionContext, args: &Payload) -> AgentryResult<Payload> {
        let values = args
            .get("values")
            .and_then(Value::as_array)
            .ok_or_else(|| AgentryError::ToolFailed {
                tool: "sum".into(),
                reason: "`values` must be an array".into(),
            })?;

        let mut total = 0.0;
        for v in values {
            if ctx.is_cancelled() {
                return Err(AgentryError::ToolFailed {
                    tool: "sum".into(),
                    reason: "cancelled by caller".into(),
                });
            }
            total += v.as_f64().unwrap_or(0.0);
        }

        let mut out = Payload::new();
        out.insert("total".into(), json!(total));
        out.insert("count".into(), json!(values.len()));
        Ok(out)
    }
}
