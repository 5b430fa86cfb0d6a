//! Toy vocabulary for conformance testing.
//!
//! A deliberately tiny closed vocabulary, enough to exercise every
//! dispatch outcome:
//!
//! - **Scalar**: registered shape carrying one signed magnitude.
//! - **Flag**: registered shape carrying one boolean.
//! - **Orphan**: a well-behaved tagged value whose tag is *not*
//!   registered, for unhandled-tag coverage.
//! - **Counterfeit**: an adversarial value that reports `Scalar`'s tag
//!   without being one, for invariant-violation coverage.
//!
//! Fixture files construct values through [`value_from_fixture`], which
//! maps a JSON object `{"shape": ..., ...fields}` to a boxed value.

use crate::shape::{Shape, Tagged};
use crate::tag::TypeTag;
use crate::vocabulary::Vocabulary;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;

/// Namespace shared by every toy tag.
pub const TOY_NAMESPACE: &str = "toy";

/// Build the toy registry: {toy#Scalar, toy#Flag}.
pub fn vocabulary() -> Vocabulary {
    Vocabulary::builder()
        .shape::<Scalar>()
        .shape::<Flag>()
        .build()
        .expect("toy registrations are disjoint")
}

/// A signed magnitude.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scalar {
    pub magnitude: i64,
}

impl Tagged for Scalar {
    fn type_tag(&self) -> TypeTag {
        Self::tag()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Shape for Scalar {
    fn tag() -> TypeTag {
        TypeTag::new(TOY_NAMESPACE, "Scalar")
    }
}

/// A boolean marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    pub enabled: bool,
}

impl Tagged for Flag {
    fn type_tag(&self) -> TypeTag {
        Self::tag()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Shape for Flag {
    fn tag() -> TypeTag {
        TypeTag::new(TOY_NAMESPACE, "Flag")
    }
}

/// A tagged value outside the registered vocabulary.
///
/// Honest about its tag; the tag simply is not registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orphan;

impl Tagged for Orphan {
    fn type_tag(&self) -> TypeTag {
        TypeTag::new(TOY_NAMESPACE, "Orphan")
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An adversarial value claiming `Scalar`'s tag.
///
/// Its `as_any` view is itself, so a downcast to [`Scalar`] fails even
/// though the tag matches. This models a defect in a vocabulary layer:
/// the tag-reporting mechanism and the value's actual capabilities
/// disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterfeit;

impl Tagged for Counterfeit {
    fn type_tag(&self) -> TypeTag {
        Scalar::tag()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Construct a boxed toy value from fixture JSON.
///
/// Expected form: `{"shape": "Scalar", "magnitude": 5}`,
/// `{"shape": "Flag", "enabled": true}`, `{"shape": "Orphan"}`, or
/// `{"shape": "Counterfeit"}`. Returns `None` for anything else.
pub fn value_from_fixture(raw: &Value) -> Option<Box<dyn Tagged>> {
    match raw.get("shape")?.as_str()? {
        "Scalar" => {
            let magnitude = raw.get("magnitude")?.as_i64()?;
            Some(Box::new(Scalar { magnitude }))
        }
        "Flag" => {
            let enabled = raw.get("enabled")?.as_bool()?;
            Some(Box::new(Flag { enabled }))
        }
        "Orphan" => Some(Box::new(Orphan)),
        "Counterfeit" => Some(Box::new(Counterfeit)),
        _ => None,
    }
}
