//! Shape capability traits.
//!
//! A vocabulary deliberately has no universal supertype carrying
//! shape-specific behavior. Values cross the dispatch boundary as
//! `&dyn Tagged`: they report their own tag and expose an [`Any`] view
//! so a matching concrete shape can be recovered without an unchecked
//! cast. The static side of the same contract is [`Shape`]: a concrete
//! type names the one tag it owns, which is how a binder derives a
//! predicate's tag from its parameter type instead of inspecting the
//! function at runtime.

use crate::tag::TypeTag;
use std::any::{Any, TypeId};

/// Runtime capability of a polymorphic value.
///
/// Every instance has exactly one tag for its entire lifetime; tags
/// never change after construction. `as_any` is the only mechanism for
/// viewing the value as a concrete shape, and the vocabulary invariant
/// is that a value tagged `T::tag()` downcasts to `T`. A value that
/// breaks that invariant is a defect in the layer that produced it,
/// which dispatch surfaces as a distinct error rather than masking.
pub trait Tagged {
    /// The tag this value was constructed with.
    fn type_tag(&self) -> TypeTag;

    /// View for attempting recovery of the concrete shape.
    fn as_any(&self) -> &dyn Any;
}

/// Static capability of a concrete shape type.
///
/// `tag()` is the compile-time end of the tag contract: for a correct
/// shape, `value.type_tag() == T::tag()` for every `value: T`.
pub trait Shape: Tagged + Sized + 'static {
    /// The one tag this concrete type owns.
    fn tag() -> TypeTag;
}

/// Identity of the concrete shape registered for one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeDescriptor {
    /// The tag this descriptor is registered under.
    pub tag: TypeTag,

    /// Concrete type identity, used to verify downcast targets.
    pub shape_id: TypeId,

    /// Rust type name, for diagnostics only.
    pub shape_name: &'static str,
}

impl ShapeDescriptor {
    /// Describe a concrete shape type.
    pub fn of<T: Shape>() -> Self {
        Self {
            tag: T::tag(),
            shape_id: TypeId::of::<T>(),
            shape_name: std::any::type_name::<T>(),
        }
    }

    /// Whether `T` is the concrete type this descriptor names.
    pub fn is<T: Shape>(&self) -> bool {
        self.shape_id == TypeId::of::<T>()
    }
}
