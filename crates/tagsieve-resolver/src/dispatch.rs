//! Call-time dispatch: tag lookup, gate, conditional delegate.
//!
//! Each [`Dispatcher::apply`] call is an independent, side-effect-free
//! decision except for the conditional delegate invocation. The
//! dispatcher holds no mutable state, so concurrent `apply` calls
//! against the same binding are fine, and the predicate always runs to
//! completion before the delegate is ever invoked.

use crate::binding::PredicateBinding;
use crate::context::ResolveContext;
use crate::delegate::DelegateResolver;
use crate::error::DispatchError;
use tagsieve_vocab::{Tagged, Vocabulary};

/// Applies validated bindings to tagged values, forwarding accepted
/// values to the delegate.
///
/// Borrows both the vocabulary and the delegate; it owns neither.
pub struct Dispatcher<'a> {
    vocabulary: &'a Vocabulary,
    delegate: &'a dyn DelegateResolver,
}

impl<'a> Dispatcher<'a> {
    pub fn new(vocabulary: &'a Vocabulary, delegate: &'a dyn DelegateResolver) -> Self {
        Self {
            vocabulary,
            delegate,
        }
    }

    /// Gate one value through one binding.
    ///
    /// In order: the value's tag must be registered
    /// ([`DispatchError::UnhandledType`] otherwise), must equal the
    /// binding's tag ([`DispatchError::PredicateUnmatched`] otherwise —
    /// the expected way a gate declines), and must downcast to the
    /// registered shape ([`DispatchError::InvariantViolation`]
    /// otherwise). The predicate then decides: an error propagates
    /// verbatim and the delegate is never called; `false` yields
    /// `Ok(false)` with no delegate call; `true` invokes the delegate
    /// exactly once and yields `Ok(true)` or
    /// [`DispatchError::Delegate`].
    ///
    /// The returned boolean reports predicate acceptance; a delegate
    /// failure after acceptance arrives on the error channel.
    pub fn apply(
        &self,
        ctx: &ResolveContext,
        value: &dyn Tagged,
        binding: &PredicateBinding,
    ) -> Result<bool, DispatchError> {
        let tag = value.type_tag();
        if !self.vocabulary.contains(&tag) {
            return Err(DispatchError::UnhandledType { tag });
        }
        if &tag != binding.tag() {
            return Err(DispatchError::PredicateUnmatched {
                value: tag,
                bound: binding.tag().clone(),
            });
        }

        let accepted = binding.invoke(ctx, value)?;
        if !accepted {
            return Ok(false);
        }
        self.delegate
            .resolve(ctx, value)
            .map_err(DispatchError::Delegate)?;
        Ok(true)
    }

    /// Gate one value through a sequence of bindings, in order.
    ///
    /// [`DispatchError::PredicateUnmatched`] means "try the next one";
    /// any other outcome is final. Returns `Ok(None)` when no binding's
    /// tag matched the value (including an empty sequence), so composed
    /// gates never see the unmatched error at all.
    pub fn apply_first(
        &self,
        ctx: &ResolveContext,
        value: &dyn Tagged,
        bindings: &[PredicateBinding],
    ) -> Result<Option<bool>, DispatchError> {
        let tag = value.type_tag();
        if !self.vocabulary.contains(&tag) {
            return Err(DispatchError::UnhandledType { tag });
        }
        for binding in bindings {
            match self.apply(ctx, value, binding) {
                Err(err) if err.is_unmatched() => continue,
                other => return other.map(Some),
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use std::cell::Cell;
    use tagsieve_vocab::toy::{self, Counterfeit, Flag, Orphan, Scalar};
    use tagsieve_vocab::{Shape, TypeTag};

    /// Delegate stub that records how often it was invoked.
    struct CountingDelegate {
        calls: Cell<usize>,
        fail: bool,
    }

    impl CountingDelegate {
        fn new() -> Self {
            Self {
                calls: Cell::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: Cell::new(0),
                fail: true,
            }
        }
    }

    impl DelegateResolver for CountingDelegate {
        fn resolve(&self, _ctx: &ResolveContext, _value: &dyn Tagged) -> Result<(), BoxError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err("delegate exploded".into())
            } else {
                Ok(())
            }
        }
    }

    fn positive_scalar(vocabulary: &Vocabulary) -> PredicateBinding {
        PredicateBinding::bind(vocabulary, |_ctx: &ResolveContext, s: &Scalar| {
            Ok(s.magnitude > 0)
        })
        .expect("Scalar is registered")
    }

    #[test]
    fn accepted_value_reaches_delegate_once() {
        let vocabulary = toy::vocabulary();
        let binding = positive_scalar(&vocabulary);
        let delegate = CountingDelegate::new();
        let dispatcher = Dispatcher::new(&vocabulary, &delegate);
        let ctx = ResolveContext::background();

        let accepted = dispatcher
            .apply(&ctx, &Scalar { magnitude: 5 }, &binding)
            .unwrap();
        assert!(accepted);
        assert_eq!(delegate.calls.get(), 1);
    }

    #[test]
    fn declined_value_never_reaches_delegate() {
        let vocabulary = toy::vocabulary();
        let binding = positive_scalar(&vocabulary);
        let delegate = CountingDelegate::new();
        let dispatcher = Dispatcher::new(&vocabulary, &delegate);
        let ctx = ResolveContext::background();

        let accepted = dispatcher
            .apply(&ctx, &Scalar { magnitude: -1 }, &binding)
            .unwrap();
        assert!(!accepted);
        assert_eq!(delegate.calls.get(), 0);
    }

    #[test]
    fn unmatched_tag_skips_predicate_and_delegate() {
        let vocabulary = toy::vocabulary();
        let binding = positive_scalar(&vocabulary);
        let delegate = CountingDelegate::new();
        let dispatcher = Dispatcher::new(&vocabulary, &delegate);
        let ctx = ResolveContext::background();

        let err = dispatcher
            .apply(&ctx, &Flag { enabled: true }, &binding)
            .unwrap_err();
        match err {
            DispatchError::PredicateUnmatched { value, bound } => {
                assert_eq!(value, Flag::tag());
                assert_eq!(bound, Scalar::tag());
            }
            other => panic!("expected PredicateUnmatched, got {other:?}"),
        }
        assert_eq!(delegate.calls.get(), 0);
    }

    #[test]
    fn unregistered_tag_is_unhandled_regardless_of_binding() {
        let vocabulary = toy::vocabulary();
        let binding = positive_scalar(&vocabulary);
        let delegate = CountingDelegate::new();
        let dispatcher = Dispatcher::new(&vocabulary, &delegate);
        let ctx = ResolveContext::background();

        let err = dispatcher.apply(&ctx, &Orphan, &binding).unwrap_err();
        match err {
            DispatchError::UnhandledType { tag } => {
                assert_eq!(tag, TypeTag::new("toy", "Orphan"));
            }
            other => panic!("expected UnhandledType, got {other:?}"),
        }
        assert_eq!(delegate.calls.get(), 0);
    }

    #[test]
    fn counterfeit_shape_is_an_invariant_violation() {
        let vocabulary = toy::vocabulary();
        let binding = positive_scalar(&vocabulary);
        let delegate = CountingDelegate::new();
        let dispatcher = Dispatcher::new(&vocabulary, &delegate);
        let ctx = ResolveContext::background();

        let err = dispatcher.apply(&ctx, &Counterfeit, &binding).unwrap_err();
        assert!(matches!(err, DispatchError::InvariantViolation { .. }));
        assert_eq!(delegate.calls.get(), 0);
    }

    #[test]
    fn predicate_failure_blocks_delegate() {
        let vocabulary = toy::vocabulary();
        let binding = PredicateBinding::bind(&vocabulary, |_ctx: &ResolveContext, _s: &Scalar| {
            Err::<bool, BoxError>("predicate exploded".into())
        })
        .unwrap();
        let delegate = CountingDelegate::new();
        let dispatcher = Dispatcher::new(&vocabulary, &delegate);
        let ctx = ResolveContext::background();

        let err = dispatcher
            .apply(&ctx, &Scalar { magnitude: 5 }, &binding)
            .unwrap_err();
        assert!(matches!(err, DispatchError::PredicateExecution(_)));
        assert_eq!(delegate.calls.get(), 0);
    }

    #[test]
    fn delegate_failure_surfaces_after_acceptance() {
        let vocabulary = toy::vocabulary();
        let binding = positive_scalar(&vocabulary);
        let delegate = CountingDelegate::failing();
        let dispatcher = Dispatcher::new(&vocabulary, &delegate);
        let ctx = ResolveContext::background();

        let err = dispatcher
            .apply(&ctx, &Scalar { magnitude: 5 }, &binding)
            .unwrap_err();
        match err {
            DispatchError::Delegate(source) => {
                assert_eq!(source.to_string(), "delegate exploded");
            }
            other => panic!("expected Delegate, got {other:?}"),
        }
        assert_eq!(delegate.calls.get(), 1);
    }

    #[test]
    fn apply_is_idempotent_for_effect_free_delegates() {
        let vocabulary = toy::vocabulary();
        let binding = positive_scalar(&vocabulary);
        let delegate = CountingDelegate::new();
        let dispatcher = Dispatcher::new(&vocabulary, &delegate);
        let ctx = ResolveContext::background();
        let value = Scalar { magnitude: 5 };

        let first = dispatcher.apply(&ctx, &value, &binding).unwrap();
        let second = dispatcher.apply(&ctx, &value, &binding).unwrap();
        assert_eq!(first, second);

        let value = Scalar { magnitude: -1 };
        let first = dispatcher.apply(&ctx, &value, &binding).unwrap();
        let second = dispatcher.apply(&ctx, &value, &binding).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn context_is_forwarded_to_the_predicate() {
        let vocabulary = toy::vocabulary();
        let binding = PredicateBinding::bind(&vocabulary, |ctx: &ResolveContext, s: &Scalar| {
            if ctx.is_cancelled() {
                return Err("cancelled".into());
            }
            Ok(s.magnitude > 0)
        })
        .unwrap();
        let delegate = CountingDelegate::new();
        let dispatcher = Dispatcher::new(&vocabulary, &delegate);

        let (ctx, handle) = ResolveContext::cancellable();
        handle.cancel();
        let err = dispatcher
            .apply(&ctx, &Scalar { magnitude: 5 }, &binding)
            .unwrap_err();
        assert!(matches!(err, DispatchError::PredicateExecution(_)));
        assert_eq!(delegate.calls.get(), 0);
    }

    #[test]
    fn apply_first_skips_unmatched_bindings() {
        let vocabulary = toy::vocabulary();
        let scalar_binding = positive_scalar(&vocabulary);
        let flag_binding =
            PredicateBinding::bind(&vocabulary, |_ctx: &ResolveContext, f: &Flag| Ok(f.enabled))
                .unwrap();
        let bindings = [scalar_binding, flag_binding];

        let delegate = CountingDelegate::new();
        let dispatcher = Dispatcher::new(&vocabulary, &delegate);
        let ctx = ResolveContext::background();

        // Second binding matches the Flag value; the first is skipped.
        let outcome = dispatcher
            .apply_first(&ctx, &Flag { enabled: true }, &bindings)
            .unwrap();
        assert_eq!(outcome, Some(true));
        assert_eq!(delegate.calls.get(), 1);
    }

    #[test]
    fn apply_first_reports_no_match_cleanly() {
        let vocabulary = toy::vocabulary();
        let flag_binding =
            PredicateBinding::bind(&vocabulary, |_ctx: &ResolveContext, f: &Flag| Ok(f.enabled))
                .unwrap();
        let delegate = CountingDelegate::new();
        let dispatcher = Dispatcher::new(&vocabulary, &delegate);
        let ctx = ResolveContext::background();

        // Registered tag, but no binding for it.
        let outcome = dispatcher
            .apply_first(&ctx, &Scalar { magnitude: 5 }, std::slice::from_ref(&flag_binding))
            .unwrap();
        assert_eq!(outcome, None);

        // Empty sequence behaves the same.
        let outcome = dispatcher
            .apply_first(&ctx, &Scalar { magnitude: 5 }, &[])
            .unwrap();
        assert_eq!(outcome, None);

        // An unregistered tag is still unhandled, never a silent miss.
        let err = dispatcher.apply_first(&ctx, &Orphan, &[]).unwrap_err();
        assert!(err.is_unhandled());
        assert_eq!(delegate.calls.get(), 0);
    }
}
