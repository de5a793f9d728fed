//! # agentry-store
//!
//! In-memory `StateManager` for the Agentry runtime, with optional
//! per-entry expiry.
//!
//! ```rust,ignore
//! use chrono::Duration;
//! use agentry_store::InMemoryStateManager;
//!
//! let store = Arc::new(InMemoryStateManager::with_ttl(Duration::hours(1)));
//! let factory = AgentFactory::new(stream, store.clone());
//! ```

pub mod memory;

pub use memory::InMemoryStateManager;
