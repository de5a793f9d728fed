//! Mock collaborators and tools shared by the unit tests in this crate.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use serde_json::{json, Value};

use agentry_contracts::{
    agent::{AgentState, Payload},
    context::ExecutionContext,
    error::{AgentryError, AgentryResult, CollaboratorError},
    event::AgentEvent,
};

use crate::traits::{EventStream, StateManager, Tool};

/// Build a `Payload` from a `json!` object literal.
pub(crate) fn payload(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture must be a JSON object, got {other}"),
    }
}

/// An event stream that records every event and can be told to fail.
#[derive(Default)]
pub(crate) struct RecordingStream {
    pub(crate) events: Mutex<Vec<AgentEvent>>,
    pub(crate) fail: AtomicBool,
}

impl RecordingStream {
    pub(crate) fn actions(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| e.action().map(str::to_string))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

impl EventStream for RecordingStream {
    fn add_event(&self, event: &AgentEvent) -> Result<(), CollaboratorError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CollaboratorError::Unavailable { reason: "stream offline".into() });
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// A state store that counts writes and can be told to fail them.
#[derive(Default)]
pub(crate) struct RecordingStore {
    pub(crate) states: Mutex<HashMap<String, AgentState>>,
    pub(crate) writes: AtomicUsize,
    pub(crate) fail: AtomicBool,
}

impl RecordingStore {
    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub(crate) fn stored(&self, id: &str) -> Option<AgentState> {
        self.states.lock().unwrap().get(id).cloned()
    }
}

impl StateManager for RecordingStore {
    fn get_state(&self, agent_id: &str) -> Result<AgentState, CollaboratorError> {
        self.stored(agent_id)
            .ok_or_else(|| CollaboratorError::NotFound { key: agent_id.to_string() })
    }

    fn update_state(&self, agent_id: &str, state: &AgentState) -> Result<(), CollaboratorError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CollaboratorError::Unavailable { reason: "store offline".into() });
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.states
            .lock()
            .unwrap()
            .insert(agent_id.to_string(), state.clone());
        Ok(())
    }
}

/// Returns `{"echo": args["msg"]}` and records every argument map it saw.
#[derive(Default)]
pub(crate) struct EchoTool {
    pub(crate) calls: Arc<Mutex<Vec<Payload>>>,
}

impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "echoes the msg argument"
    }

    fn execute(&self, _ctx: &ExecutionContext, args: &Payload) -> AgentryResult<Payload> {
        self.calls.lock().unwrap().push(args.clone());
        let msg = args.get("msg").cloned().unwrap_or(Value::Null);
        Ok(payload(json!({ "echo": msg })))
    }
}

/// A tool whose name, output and failure mode are configurable.
pub(crate) struct FixedTool {
    pub(crate) name: String,
    pub(crate) output: Value,
    pub(crate) fails: bool,
    pub(crate) schema: Option<Value>,
    pub(crate) invocations: Arc<AtomicUsize>,
}

impl FixedTool {
    pub(crate) fn new(name: &str, output: Value) -> Self {
        Self {
            name: name.to_string(),
            output,
            fails: false,
            schema: None,
            invocations: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl Tool for FixedTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "returns a fixed output"
    }

    fn parameters_schema(&self) -> Option<Value> {
        self.schema.clone()
    }

    fn execute(&self, _ctx: &ExecutionContext, _args: &Payload) -> AgentryResult<Payload> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        if self.fails {
            return Err(AgentryError::ToolFailed {
                tool: self.name.clone(),
                reason: "upstream timeout".into(),
            });
        }
        Ok(payload(self.output.clone()))
    }
}
