//! # agentry-core
//!
//! The in-process agent runtime for Agentry.
//!
//! This crate provides:
//! - The three seam traits (`Tool`, `EventStream`, `StateManager`)
//! - `Agent`, which owns a lifecycle state machine, a tool registry and a
//!   configuration map, and reports to the injected collaborators
//! - `AgentFactory`, the id-unique registry that creates agents
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agentry_core::{AgentFactory, traits::{EventStream, StateManager}};
//!
//! let factory = AgentFactory::new(stream, store);
//! let agent = factory.create_agent("a1", "Agent One", "worker", ["search"])?;
//! agent.start(&ExecutionContext::new())?;
//! ```

pub mod agent;
pub mod factory;
pub(crate) mod lock;
pub mod schema;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

pub use agent::Agent;
pub use factory::AgentFactory;
