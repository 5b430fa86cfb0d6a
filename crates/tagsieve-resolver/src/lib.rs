//! # Tagsieve resolver
//!
//! The gating core: register exactly one typed predicate against a
//! closed vocabulary, then apply it to values whose runtime tag may or
//! may not match the predicate's shape — with no unchecked casts and
//! no silent fallthrough.
//!
//! Two components, consumed in order:
//!
//! ```text
//! PredicateBinding      ← bind-time: predicate shape validated against
//!     │                   the vocabulary, then type-erased
//! Dispatcher            ← call-time: tag lookup → tag match → downcast
//!                         → predicate → conditional delegate
//! ```
//!
//! Every dispatch outcome is a distinct value of [`DispatchError`] or a
//! clean boolean; callers compose gates by treating
//! [`DispatchError::PredicateUnmatched`] as "try the next one".
//!
//! The core schedules nothing and blocks nowhere itself: the only
//! suspension points are inside the caller's predicate and delegate,
//! both of which receive the caller's [`ResolveContext`] unchanged.

pub mod binding;
pub mod context;
pub mod delegate;
pub mod dispatch;
pub mod error;

pub use binding::PredicateBinding;
pub use context::{CancelHandle, ResolveContext};
pub use delegate::DelegateResolver;
pub use dispatch::Dispatcher;
pub use error::{BoxError, ConstructionError, DispatchError};
