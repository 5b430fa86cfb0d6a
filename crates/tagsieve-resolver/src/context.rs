//! Cancellation/deadline context threaded through predicate and delegate.
//!
//! The core never originates or interprets cancellation: it forwards the
//! caller's context unchanged and propagates whatever error a predicate
//! or delegate reports after observing it. A context is cheap to clone;
//! clones share the same cancellation flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Caller-owned context forwarded to predicates and delegates.
#[derive(Debug, Clone, Default)]
pub struct ResolveContext {
    cancelled: Option<Arc<AtomicBool>>,
    deadline: Option<Instant>,
}

impl ResolveContext {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context with a cancellation flag, plus the handle that trips it.
    pub fn cancellable() -> (Self, CancelHandle) {
        let flag = Arc::new(AtomicBool::new(false));
        let ctx = Self {
            cancelled: Some(flag.clone()),
            deadline: None,
        };
        (ctx, CancelHandle { flag })
    }

    /// This context with a deadline attached.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Whether the caller has cancelled, or the deadline has passed.
    ///
    /// Predicates and delegates may poll this; the dispatch path itself
    /// never does.
    pub fn is_cancelled(&self) -> bool {
        if let Some(flag) = &self.cancelled
            && flag.load(Ordering::Relaxed)
        {
            return true;
        }
        matches!(self.deadline, Some(deadline) if Instant::now() >= deadline)
    }

    /// The deadline, if one was attached.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

/// Trips the cancellation flag shared with a [`ResolveContext`].
#[derive(Debug, Clone)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}
