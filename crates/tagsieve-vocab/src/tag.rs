//! Two-part tags identifying shapes in the vocabulary.
//!
//! A tag is a (namespace, name) pair. Every value carries exactly one
//! tag for its entire lifetime, and the vocabulary maps each tag to
//! exactly one concrete shape. Equality is structural.

use serde::{Deserialize, Serialize};

/// Immutable identity of one shape in the vocabulary.
///
/// The namespace keeps independently-defined vocabularies from
/// colliding on short type names; the full set of valid tags is fixed
/// when the [`crate::Vocabulary`] is built.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeTag {
    pub namespace: String,
    pub name: String,
}

impl TypeTag {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.namespace, self.name)
    }
}
