//! Error taxonomy for binding and dispatch.
//!
//! Six failure kinds stay distinguishable end to end; none is ever
//! collapsed into a generic error. Callers composing several bindings
//! treat [`DispatchError::PredicateUnmatched`] and
//! [`DispatchError::UnhandledType`] as ordinary control flow; the rest
//! are exceptional.

use tagsieve_vocab::TypeTag;

/// Boxed error produced by a caller's predicate or delegate.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Bind-time failures. Fatal to that binding attempt only; supplying a
/// predicate over a registered shape is the recovery.
#[derive(Debug, thiserror::Error)]
pub enum ConstructionError {
    /// The predicate's declared input shape is not registered in the
    /// vocabulary, or its tag is registered to a different concrete
    /// type. The predicate could never be called, so binding refuses up
    /// front instead of failing silently at dispatch time.
    #[error("unsupported predicate signature: shape {shape} (tag {tag}) is not in the vocabulary")]
    UnsupportedPredicateSignature { shape: &'static str, tag: TypeTag },
}

/// Dispatch-time failures, one variant per distinguishable outcome.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The value's tag is not in the vocabulary at all — the only case
    /// where no dispatch decision could be made.
    #[error("unhandled type {tag}: tag is not in the vocabulary")]
    UnhandledType { tag: TypeTag },

    /// The value's tag is registered but differs from the binding's.
    /// Not a defect: this is how a gate declines to examine a value.
    #[error("predicate bound to {bound} does not match value tagged {value}")]
    PredicateUnmatched { value: TypeTag, bound: TypeTag },

    /// The tag matched the binding but the value does not actually
    /// expose the registered shape. A contract breach between the
    /// tag-reporting mechanism and the value's capabilities; surfaced
    /// loudly, never recovered from silently.
    #[error("value tagged {tag} does not expose registered shape {shape}")]
    InvariantViolation { tag: TypeTag, shape: &'static str },

    /// The predicate itself failed; propagated verbatim, the delegate
    /// is never called.
    #[error("predicate execution failed")]
    PredicateExecution(#[source] BoxError),

    /// The delegate failed after the predicate accepted.
    #[error("delegate resolution failed")]
    Delegate(#[source] BoxError),
}

impl DispatchError {
    /// Stable classification string, one of [`failure_class`].
    pub fn class(&self) -> &'static str {
        match self {
            DispatchError::UnhandledType { .. } => failure_class::UNHANDLED_TYPE,
            DispatchError::PredicateUnmatched { .. } => failure_class::PREDICATE_UNMATCHED,
            DispatchError::InvariantViolation { .. } => failure_class::INVARIANT_VIOLATION,
            DispatchError::PredicateExecution(_) => failure_class::PREDICATE_EXECUTION,
            DispatchError::Delegate(_) => failure_class::DELEGATE_FAILURE,
        }
    }

    /// Whether this is the "gate declined, try the next binding" case.
    pub fn is_unmatched(&self) -> bool {
        matches!(self, DispatchError::PredicateUnmatched { .. })
    }

    /// Whether the vocabulary does not recognize the value at all.
    pub fn is_unhandled(&self) -> bool {
        matches!(self, DispatchError::UnhandledType { .. })
    }
}

/// Failure classification constants for structured reporting.
pub mod failure_class {
    pub const UNHANDLED_TYPE: &str = "unhandled_type";
    pub const PREDICATE_UNMATCHED: &str = "predicate_unmatched";
    pub const INVARIANT_VIOLATION: &str = "invariant_violation";
    pub const PREDICATE_EXECUTION: &str = "predicate_execution";
    pub const DELEGATE_FAILURE: &str = "delegate_failure";
}
