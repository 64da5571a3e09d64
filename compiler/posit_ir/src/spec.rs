//! Persisted constraint occurrences.

use crate::value::{signature_of, ArgumentValue};
use crate::views::Signature;

/// One constraint occurrence submitted for reconstruction.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintSpec {
    /// Name of the definition to resolve against.
    pub name: String,
    pub args: Vec<ArgumentValue>,
}

impl ConstraintSpec {
    pub fn new(name: impl Into<String>, args: Vec<ArgumentValue>) -> Self {
        ConstraintSpec {
            name: name.into(),
            args,
        }
    }

    pub fn signature(&self) -> Signature {
        signature_of(&self.args)
    }
}
