//! The caller-supplied execution context.
//!
//! The runtime imposes no timeouts of its own. A context carries the
//! caller's deadline and cancellation flag through to tool implementations,
//! which are expected to honor them.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

/// Correlation id, optional deadline and a shared cancellation flag.
///
/// Clones share the cancellation flag, so cancelling any clone cancels all.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    correlation_id: Option<String>,
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl ExecutionContext {
    /// A context with no deadline and no correlation id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a correlation id. Lifecycle events record it.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Set a deadline `timeout` from now.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline. `None` when no deadline is set.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Signal cancellation to every holder of this context.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// True once `cancel()` was called or the deadline has passed.
    pub fn is_cancelled(&self) -> bool {
        if self.cancelled.load(Ordering::SeqCst) {
            return true;
        }
        matches!(self.deadline, Some(d) if Instant::now() >= d)
    }
}
