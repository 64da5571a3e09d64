//! Persisted argument payloads.
//!
//! An `ArgumentValue` is what a reconstruction spec actually carries for one
//! argument position: a tagged scalar, a tagged single view, or an array
//! whose elements each carry their own tag.

use std::fmt;

use crate::views::{ActualType, Signature, ViewKind};

/// Index of a variable in a model's variable store.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VarId(u32);

impl VarId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        VarId(index)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Class of variable a store slot holds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VarClass {
    Int,
    Bool,
    Set,
}

impl fmt::Display for VarClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VarClass::Int => "int",
            VarClass::Bool => "bool",
            VarClass::Set => "set",
        })
    }
}

/// Integer set literal, stored as sorted, disjoint, inclusive ranges.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<(i64, i64)>", into = "Vec<(i64, i64)>")
)]
pub struct IntSet {
    ranges: Vec<(i64, i64)>,
}

impl IntSet {
    /// Build a set from arbitrary inclusive ranges.
    ///
    /// Empty ranges (`lo > hi`) are dropped; overlapping and adjacent ranges
    /// are merged.
    pub fn from_ranges(ranges: impl IntoIterator<Item = (i64, i64)>) -> Self {
        let mut ranges: Vec<_> = ranges.into_iter().filter(|(lo, hi)| lo <= hi).collect();
        ranges.sort_unstable();
        let mut merged: Vec<(i64, i64)> = Vec::with_capacity(ranges.len());
        for (lo, hi) in ranges {
            match merged.last_mut() {
                Some(last) if lo <= last.1.saturating_add(1) => last.1 = last.1.max(hi),
                _ => merged.push((lo, hi)),
            }
        }
        IntSet { ranges: merged }
    }

    pub fn range(lo: i64, hi: i64) -> Self {
        IntSet::from_ranges([(lo, hi)])
    }

    pub fn ranges(&self) -> &[(i64, i64)] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn contains(&self, value: i64) -> bool {
        self.ranges.iter().any(|&(lo, hi)| lo <= value && value <= hi)
    }
}

impl From<Vec<(i64, i64)>> for IntSet {
    fn from(ranges: Vec<(i64, i64)>) -> Self {
        IntSet::from_ranges(ranges)
    }
}

impl From<IntSet> for Vec<(i64, i64)> {
    fn from(set: IntSet) -> Self {
        set.ranges
    }
}

impl fmt::Display for IntSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (lo, hi)) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if lo == hi {
                write!(f, "{lo}")?;
            } else {
                write!(f, "{lo}..{hi}")?;
            }
        }
        f.write_str("}")
    }
}

/// Constant baked into a call by the registry rather than taken from a slot.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Literal {
    /// Symbolic enum constant such as `IRT_EQ` or `ICL_DOM`.
    Symbol(String),
    Int(i64),
    Bool(bool),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Symbol(s) => f.write_str(s),
            Literal::Int(n) => write!(f, "{n}"),
            Literal::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// One tagged argument payload.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ArgumentValue {
    Int(i64),
    Set(IntSet),
    Var(VarId),
    /// `offset + var`.
    Offset(i64, VarId),
    /// `scale * var`.
    Scale(i64, VarId),
    Minus(VarId),
    Const(i64),
    Bool(VarId),
    NotBool(VarId),
    SetVar(VarId),
    Array(Vec<ArgumentValue>),
}

impl ArgumentValue {
    /// View kind of a non-array value; `None` for arrays.
    pub fn view_kind(&self) -> Option<ViewKind> {
        Some(match self {
            ArgumentValue::Int(_) => ViewKind::Scalar,
            ArgumentValue::Set(_) => ViewKind::IntSet,
            ArgumentValue::Var(_) => ViewKind::Variable,
            ArgumentValue::Offset(..) => ViewKind::OffsetVariable,
            ArgumentValue::Scale(..) => ViewKind::ScaleVariable,
            ArgumentValue::Minus(_) => ViewKind::NegatedVariable,
            ArgumentValue::Const(_) => ViewKind::ConstantAsVariable,
            ArgumentValue::Bool(_) => ViewKind::BooleanVariable,
            ArgumentValue::NotBool(_) => ViewKind::NegatedBooleanVariable,
            ArgumentValue::SetVar(_) => ViewKind::SetVariable,
            ArgumentValue::Array(_) => return None,
        })
    }

    /// Observed type, following first elements down through nested arrays.
    pub fn actual_type(&self) -> ActualType {
        let mut depth: u8 = 0;
        let mut current = self;
        loop {
            match current {
                ArgumentValue::Array(items) => {
                    depth = depth.saturating_add(1);
                    match items.first() {
                        Some(first) => current = first,
                        None => return ActualType { kind: None, depth },
                    }
                }
                leaf => {
                    return ActualType {
                        kind: leaf.view_kind(),
                        depth,
                    }
                }
            }
        }
    }

    /// Elements of an array value.
    pub fn as_array(&self) -> Option<&[ArgumentValue]> {
        match self {
            ArgumentValue::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// Observed signature of an argument list.
pub fn signature_of(args: &[ArgumentValue]) -> Signature {
    args.iter().map(ArgumentValue::actual_type).collect()
}
