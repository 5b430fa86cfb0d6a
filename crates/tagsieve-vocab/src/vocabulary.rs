//! The closed shape registry.
//!
//! A [`Vocabulary`] is a total mapping from [`TypeTag`] to the concrete
//! shape registered for it, built once through [`VocabularyBuilder`] and
//! read-only afterward. Build-time validation enforces the two registry
//! invariants: every tag has exactly one shape, and no two tags share a
//! shape. After `build`, unsynchronized concurrent reads from multiple
//! threads are fine.

use crate::shape::{Shape, ShapeDescriptor};
use crate::tag::TypeTag;
use std::any::TypeId;
use std::collections::{BTreeMap, HashMap};

/// Registry construction failures.
#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    /// Two registrations claimed the same tag.
    #[error("duplicate tag {tag}: already registered to {existing}")]
    DuplicateTag {
        tag: TypeTag,
        existing: &'static str,
    },

    /// One concrete type was registered under two tags.
    #[error("shape {shape} registered under both {first} and {second}")]
    SharedShape {
        shape: &'static str,
        first: TypeTag,
        second: TypeTag,
    },
}

/// Accumulates shape registrations, validated at [`build`](Self::build).
///
/// Registration order does not matter; the built registry iterates tags
/// in lexicographic order.
#[derive(Default)]
pub struct VocabularyBuilder {
    rows: Vec<ShapeDescriptor>,
}

impl VocabularyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one concrete shape under its own tag.
    pub fn shape<T: Shape>(mut self) -> Self {
        self.rows.push(ShapeDescriptor::of::<T>());
        self
    }

    /// Validate the accumulated rows and produce the read-only registry.
    ///
    /// Fails on the first duplicate tag or shared shape; fixing the
    /// registration list is the only recovery.
    pub fn build(self) -> Result<Vocabulary, VocabularyError> {
        let mut by_tag: BTreeMap<TypeTag, ShapeDescriptor> = BTreeMap::new();
        let mut by_shape: HashMap<TypeId, TypeTag> = HashMap::new();

        for row in self.rows {
            if let Some(existing) = by_tag.get(&row.tag) {
                return Err(VocabularyError::DuplicateTag {
                    tag: row.tag,
                    existing: existing.shape_name,
                });
            }
            if let Some(first) = by_shape.get(&row.shape_id) {
                return Err(VocabularyError::SharedShape {
                    shape: row.shape_name,
                    first: first.clone(),
                    second: row.tag,
                });
            }
            by_shape.insert(row.shape_id, row.tag.clone());
            by_tag.insert(row.tag.clone(), row);
        }

        Ok(Vocabulary { by_tag, by_shape })
    }
}

/// The closed vocabulary: `TypeTag -> ShapeDescriptor`, plus the reverse
/// index used to check that a registered tag still names the concrete
/// type a caller bound against.
#[derive(Debug)]
pub struct Vocabulary {
    by_tag: BTreeMap<TypeTag, ShapeDescriptor>,
    by_shape: HashMap<TypeId, TypeTag>,
}

impl Vocabulary {
    pub fn builder() -> VocabularyBuilder {
        VocabularyBuilder::new()
    }

    /// Whether the vocabulary recognizes this tag at all.
    pub fn contains(&self, tag: &TypeTag) -> bool {
        self.by_tag.contains_key(tag)
    }

    /// The descriptor registered for a tag, if any.
    pub fn descriptor(&self, tag: &TypeTag) -> Option<&ShapeDescriptor> {
        self.by_tag.get(tag)
    }

    /// The tag a concrete shape type is registered under, if any.
    pub fn tag_of<T: Shape>(&self) -> Option<&TypeTag> {
        self.by_shape.get(&TypeId::of::<T>())
    }

    /// All registered tags, in lexicographic order.
    pub fn tags(&self) -> impl Iterator<Item = &TypeTag> {
        self.by_tag.keys()
    }

    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }
}
