//! Bind-time validation of typed predicates.
//!
//! A predicate only knows how to examine one concrete shape. Binding
//! validates that shape against the vocabulary exactly once, at
//! construction — never deferred to dispatch time, where the failure
//! would be far harder to localize — and then erases the predicate
//! behind a closure that downcasts before invoking. A binding is
//! immutable after construction and safe to share across threads.

use crate::context::ResolveContext;
use crate::error::{BoxError, ConstructionError, DispatchError};
use tagsieve_vocab::{Shape, Tagged, TypeTag, Vocabulary};

type ErasedPredicate =
    Box<dyn Fn(&ResolveContext, &dyn Tagged) -> Result<bool, DispatchError> + Send + Sync>;

/// A validated pairing of a caller predicate with the one tag it is
/// allowed to examine.
pub struct PredicateBinding {
    tag: TypeTag,
    shape_name: &'static str,
    predicate: ErasedPredicate,
}

impl PredicateBinding {
    /// Validate and bind one typed predicate.
    ///
    /// The predicate's declared input shape `T` must be registered in
    /// the vocabulary under `T::tag()`; anything else fails with
    /// [`ConstructionError::UnsupportedPredicateSignature`], carrying
    /// the offending shape so the caller can fix the program. Predicates
    /// of the wrong arity or return type do not typecheck at all.
    pub fn bind<T, F>(vocabulary: &Vocabulary, predicate: F) -> Result<Self, ConstructionError>
    where
        T: Shape,
        F: Fn(&ResolveContext, &T) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        let tag = T::tag();
        let shape_name = std::any::type_name::<T>();

        // The tag must be registered, and registered to T itself: a tag
        // claimed by a different concrete type could never produce a
        // value this predicate may examine.
        let registered_to_t = vocabulary
            .descriptor(&tag)
            .is_some_and(|descriptor| descriptor.is::<T>());
        if !registered_to_t {
            return Err(ConstructionError::UnsupportedPredicateSignature {
                shape: shape_name,
                tag,
            });
        }

        let erased_tag = tag.clone();
        let erased: ErasedPredicate = Box::new(move |ctx, value| {
            match value.as_any().downcast_ref::<T>() {
                Some(shaped) => predicate(ctx, shaped).map_err(DispatchError::PredicateExecution),
                // Tag matched but the value does not actually carry the
                // registered shape: a vocabulary-layer defect.
                None => Err(DispatchError::InvariantViolation {
                    tag: erased_tag.clone(),
                    shape: shape_name,
                }),
            }
        });

        Ok(Self {
            tag,
            shape_name,
            predicate: erased,
        })
    }

    /// The tag this binding was validated against.
    pub fn tag(&self) -> &TypeTag {
        &self.tag
    }

    /// Rust type name of the bound shape, for diagnostics.
    pub fn shape_name(&self) -> &'static str {
        self.shape_name
    }

    /// Downcast and run the predicate. Only called by the dispatcher
    /// after the value's tag was found equal to [`Self::tag`].
    pub(crate) fn invoke(
        &self,
        ctx: &ResolveContext,
        value: &dyn Tagged,
    ) -> Result<bool, DispatchError> {
        (self.predicate)(ctx, value)
    }
}

impl std::fmt::Debug for PredicateBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredicateBinding")
            .field("tag", &self.tag)
            .field("shape_name", &self.shape_name)
            .finish_non_exhaustive()
    }
}
