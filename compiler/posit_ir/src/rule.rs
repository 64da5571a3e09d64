//! Transform rules: how each call argument is produced from the slots.

use smallvec::{smallvec, SmallVec};

use crate::value::Literal;

/// Position of a slot within a variant's declared slot list.
pub type SlotIndex = usize;

/// Component of an `(constant, variable)` pair.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PairComponent {
    /// The constant.
    First,
    /// The variable.
    Second,
}

/// Production rule for one call argument.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TransformRule {
    /// The slot's payload, converted element by element.
    Direct(SlotIndex),
    /// One component of a pair, or of every pair in an array.
    #[cfg_attr(feature = "serde", serde(rename = "project"))]
    ProjectPair(SlotIndex, PairComponent),
    /// First slot's elements followed by the second's.
    #[cfg_attr(feature = "serde", serde(rename = "concat"))]
    Concatenate(SlotIndex, SlotIndex),
    /// Like `Concatenate`, negating every element taken from the second slot.
    #[cfg_attr(feature = "serde", serde(rename = "concat_negated"))]
    ConcatenateNegated(SlotIndex, SlotIndex),
    /// Array built from several single-valued slots, in listed order.
    Gather(Vec<SlotIndex>),
    /// Constant argument independent of the slots.
    Literal(Literal),
}

impl TransformRule {
    /// Slots this rule reads, in reading order.
    pub fn slots(&self) -> SmallVec<[SlotIndex; 4]> {
        match self {
            TransformRule::Direct(i) | TransformRule::ProjectPair(i, _) => smallvec![*i],
            TransformRule::Concatenate(i, j) | TransformRule::ConcatenateNegated(i, j) => {
                smallvec![*i, *j]
            }
            TransformRule::Gather(slots) => slots.iter().copied().collect(),
            TransformRule::Literal(_) => SmallVec::new(),
        }
    }
}
