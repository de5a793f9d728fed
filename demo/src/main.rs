//! Agentry runtime demo CLI
//!
//! Loads an agent roster, wires the in-memory event stream and state store
//! into an agent factory, and drives the agents through a full lifecycle.
//!
//! Usage:
//!   cargo run -p demo -- run
//!   cargo run -p demo -- run --roster path/to/roster.toml
//!   cargo run -p demo -- agents --role analyst
//!   cargo run -p demo -- agents --capability echo

mod tools;

use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

use agentry_contracts::{
    agent::{AgentStatus, Payload},
    context::ExecutionContext,
    error::AgentryResult,
};
use agentry_core::{Agent, AgentFactory};
use agentry_roster::RosterConfig;
use agentry_store::InMemoryStateManager;
use agentry_stream::InMemoryEventStream;

use crate::tools::{EchoTool, SumTool};

/// Roster used when `--roster` is not given.
const DEFAULT_ROSTER: &str = include_str!("../roster.toml");

// ── CLI definition ────────────────────────────────────────────────────────────

/// Agentry: in-process agent lifecycle and tool orchestration demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "Agentry agent runtime demo",
    long_about = "Creates agents from a TOML roster, starts them, executes tools,\n\
                  updates state, stops them, and verifies the event chain."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full lifecycle walk-through.
    Run {
        /// Roster TOML file. Defaults to the bundled roster.
        #[arg(long)]
        roster: Option<PathBuf>,
    },
    /// List roster agents, optionally filtered.
    Agents {
        /// Roster TOML file. Defaults to the bundled roster.
        #[arg(long)]
        roster: Option<PathBuf>,
        /// Only agents with this exact role.
        #[arg(long)]
        role: Option<String>,
        /// Only agents holding this capability.
        #[arg(long)]
        capability: Option<String>,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run { roster } => run(roster),
        Command::Agents { roster, role, capability } => list_agents(roster, role, capability),
    };

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

// ── Wiring ────────────────────────────────────────────────────────────────────

struct Runtime {
    factory: AgentFactory,
    stream: Arc<InMemoryEventStream>,
}

fn load_roster(path: Option<PathBuf>) -> AgentryResult<RosterConfig> {
    match path {
        Some(path) => RosterConfig::from_file(&path),
        None => RosterConfig::from_toml_str(DEFAULT_ROSTER),
    }
}

fn build_runtime(roster: &RosterConfig) -> AgentryResult<Runtime> {
    let store = match roster.store.ttl() {
        Some(ttl) => InMemoryStateManager::with_ttl(ttl),
        None => InMemoryStateManager::new(),
    };
    let stream = Arc::new(InMemoryEventStream::new());
    let factory = AgentFactory::new(stream.clone(), Arc::new(store));

    for agent in roster.load_into(&factory)? {
        if agent.has_capability("echo") {
            agent.add_tool(EchoTool);
        }
        if agent.has_capability("math") {
            agent.add_tool(SumTool);
        }
    }

    Ok(Runtime { factory, stream })
}

fn args(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        _ => Payload::new(),
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run(roster_path: Option<PathBuf>) -> AgentryResult<()> {
    let roster = load_roster(roster_path)?;
    let Runtime { factory, stream } = build_runtime(&roster)?;

    println!();
    println!("Agentry agent runtime demo");
    println!("==========================");
    println!();

    let ctx = ExecutionContext::new()
        .with_correlation_id("demo-run")
        .with_timeout(Duration::from_secs(5));

    factory.start_all(&ctx)?;
    println!("[1] Started {} agent(s)", factory.len());
    for agent in factory.list_agents() {
        println!("    {:<12} role={:<8} tools={:?}", agent.id(), agent.role(), agent.tool_names());
    }

    println!();
    println!("[2] Tool execution");
    for agent in factory.agents_by_capability("echo") {
        let message = format!("hello from {}", agent.name());
        report(&agent, "echo", agent.execute_tool(&ctx, "echo", &args(json!({ "msg": message }))));
    }
    for agent in factory.agents_by_capability("math") {
        report(
            &agent,
            "sum",
            agent.execute_tool(&ctx, "sum", &args(json!({ "values": [1, 2, 3.5] }))),
        );
    }

    // Rejected calls: schema violation and an unregistered tool.
    if let Some(agent) = factory.agents_by_capability("math").first() {
        report(
            agent,
            "sum",
            agent.execute_tool(&ctx, "sum", &args(json!({ "values": "1,2,3" }))),
        );
        report(agent, "grep", agent.execute_tool(&ctx, "grep", &Payload::new()));
    }

    println!();
    println!("[3] State updates");
    for agent in factory.agents_by_role("analyst") {
        let mut state = agent.state().with_status(AgentStatus::Custom("analyzing".into()));
        state.data.insert("progress".into(), json!(50));
        agent.update_state(state)?;
        let stored = agent.persisted_state()?;
        println!(
            "    {:<12} status={} persisted={} data={}",
            agent.id(),
            agent.state().status,
            stored.status,
            Value::Object(stored.data)
        );
    }

    println!();
    factory.stop_all()?;
    println!("[4] Stopped all agents");

    println!();
    println!("[5] Event stream ({} events)", stream.len());
    for record in stream.records() {
        println!(
            "    #{:<3} {:<12} {:<14} {}…",
            record.sequence,
            record.event.source,
            record.event.action().unwrap_or("-"),
            &record.this_hash[..16]
        );
    }
    let intact = stream.verify_integrity();
    println!("    chain integrity: {}", if intact { "VERIFIED" } else { "BROKEN" });

    factory.shutdown()?;
    info!(events = stream.len(), intact, "demo run finished");
    println!();
    Ok(())
}

fn report(agent: &Agent, tool: &str, result: AgentryResult<Payload>) {
    match result {
        Ok(out) => println!("    {:<12} {:<5} -> {}", agent.id(), tool, Value::Object(out)),
        Err(e) => println!("    {:<12} {:<5} !! {}", agent.id(), tool, e),
    }
}

fn list_agents(
    roster_path: Option<PathBuf>,
    role: Option<String>,
    capability: Option<String>,
) -> AgentryResult<()> {
    let roster = load_roster(roster_path)?;
    let Runtime { factory, .. } = build_runtime(&roster)?;

    let mut agents = match role.as_deref() {
        Some(role) => factory.agents_by_role(role),
        None => factory.list_agents(),
    };
    if let Some(cap) = capability.as_deref() {
        agents.retain(|a| a.has_capability(cap));
    }

    for agent in agents {
        let config = Value::Object(agent.configuration());
        println!(
            "{:<12} {:<16} role={:<8} capabilities={:?} configuration={}",
            agent.id(),
            agent.name(),
            agent.role(),
            agent.capabilities(),
            config
        );
    }
    Ok(())
}
