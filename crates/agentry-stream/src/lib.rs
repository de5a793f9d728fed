//! # agentry-stream
//!
//! Append-only, SHA-256 hash-chained in-memory event stream for the Agentry
//! runtime.
//!
//! Every appended event is wrapped in a `StreamRecord` linked to its
//! predecessor by hash. Altering any stored event breaks the chain, which
//! `verify_chain` detects.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use agentry_stream::InMemoryEventStream;
//!
//! let stream = Arc::new(InMemoryEventStream::new());
//! let factory = AgentFactory::new(stream.clone(), store);
//! // ... drive agents ...
//! assert!(stream.verify_integrity());
//! ```

pub mod chain;
pub mod memory;
pub mod record;

pub use chain::{hash_record, verify_chain};
pub use memory::InMemoryEventStream;
pub use record::StreamRecord;

// ── Tests ─────────────────────────────────────────────────────────────────────
