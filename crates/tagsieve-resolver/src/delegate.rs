//! Delegate seam: the downstream resolution step.
//!
//! The dispatcher borrows a delegate and calls it exactly once per
//! accepted value, after the predicate has run to completion. It never
//! owns the delegate's lifecycle and never retries on its behalf.

use crate::context::ResolveContext;
use crate::error::BoxError;
use tagsieve_vocab::Tagged;

/// Downstream resolution invoked only when a predicate accepts a value.
///
/// Implementations receive the caller's context unchanged and may block
/// or observe cancellation; the dispatcher propagates whatever error
/// they report without interpretation.
pub trait DelegateResolver {
    fn resolve(&self, ctx: &ResolveContext, value: &dyn Tagged) -> Result<(), BoxError>;
}

/// Closures work as delegates directly.
impl<F> DelegateResolver for F
where
    F: Fn(&ResolveContext, &dyn Tagged) -> Result<(), BoxError>,
{
    fn resolve(&self, ctx: &ResolveContext, value: &dyn Tagged) -> Result<(), BoxError> {
        self(ctx, value)
    }
}
