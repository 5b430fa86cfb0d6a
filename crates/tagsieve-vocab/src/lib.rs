//! # Tagsieve vocabulary
//!
//! The vocabulary layer: a closed, statically-known set of tagged
//! polymorphic shapes and the registry that makes the mapping from
//! runtime tag to concrete shape total and unambiguous.
//!
//! This crate is **content-agnostic**: it does not define what shapes
//! mean, how they are encoded on the wire, or how they are constructed
//! from serialized form. It only prescribes how shapes identify
//! themselves and how the registry binds each tag to exactly one of
//! them.
//!
//! ## Architecture
//!
//! ```text
//! TypeTag               ← (namespace, name) identity of one shape
//!     │
//! Tagged                ← runtime capability: report tag, expose view
//!     │
//! Shape                 ← static capability: the tag a concrete type owns
//!     │
//! Vocabulary            ← TypeTag → ShapeDescriptor, built once, read-only
//! ```

pub mod shape;
pub mod tag;
pub mod toy;
pub mod vocabulary;

pub use shape::{Shape, ShapeDescriptor, Tagged};
pub use tag::TypeTag;
pub use vocabulary::{Vocabulary, VocabularyBuilder, VocabularyError};
