//! View type catalog.
//!
//! The closed set of representations a stored value can take when it is
//! passed to an operation, together with the compatibility predicate the
//! resolver uses to match a declared slot against an observed argument.
//!
//! Compatibility is exact-kind equality. There is no implicit coercion:
//! a `ConstantAsVariable` argument only reaches an operation through a
//! variant that declares `ConstantAsVariable` for that slot.

use std::fmt;

use smallvec::SmallVec;

/// One member of the closed set of value representations.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ViewKind {
    /// Plain integer.
    Scalar,
    /// Integer set literal.
    IntSet,
    /// Integer variable, used as-is.
    Variable,
    /// `constant + variable`.
    OffsetVariable,
    /// `constant * variable`.
    ScaleVariable,
    /// `-variable`.
    NegatedVariable,
    /// Compile-time integer presented as a variable.
    ConstantAsVariable,
    /// Boolean variable.
    BooleanVariable,
    /// Logical negation of a boolean variable.
    NegatedBooleanVariable,
    /// Set variable.
    SetVariable,
}

/// Concrete form a marshalled value of a given kind takes.
///
/// Two kinds share a shape exactly when their marshalled values can be
/// placed side by side in one array.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Shape {
    Int,
    IntSet,
    IntHandle,
    BoolHandle,
    SetHandle,
    OffsetPair,
    ScalePair,
}

impl ViewKind {
    /// Every kind in the catalog, in declaration order.
    pub const ALL: [ViewKind; 10] = [
        ViewKind::Scalar,
        ViewKind::IntSet,
        ViewKind::Variable,
        ViewKind::OffsetVariable,
        ViewKind::ScaleVariable,
        ViewKind::NegatedVariable,
        ViewKind::ConstantAsVariable,
        ViewKind::BooleanVariable,
        ViewKind::NegatedBooleanVariable,
        ViewKind::SetVariable,
    ];

    /// Whether an argument of kind `actual` may fill a slot declared `declared`.
    ///
    /// Total over the catalog and free of side effects. This is the only
    /// decision point the resolver consults.
    #[inline]
    pub fn compatible(declared: ViewKind, actual: ViewKind) -> bool {
        declared == actual
    }

    /// Registry token for this kind (`intvar`, `offsetvar`, ...).
    pub fn token(self) -> &'static str {
        match self {
            ViewKind::Scalar => "int",
            ViewKind::IntSet => "intset",
            ViewKind::Variable => "intvar",
            ViewKind::OffsetVariable => "offsetvar",
            ViewKind::ScaleVariable => "scalevar",
            ViewKind::NegatedVariable => "minusvar",
            ViewKind::ConstantAsVariable => "constint",
            ViewKind::BooleanVariable => "boolvar",
            ViewKind::NegatedBooleanVariable => "negboolvar",
            ViewKind::SetVariable => "setvar",
        }
    }

    /// Inverse of [`ViewKind::token`].
    pub fn from_token(token: &str) -> Option<ViewKind> {
        ViewKind::ALL.into_iter().find(|kind| kind.token() == token)
    }

    pub fn shape(self) -> Shape {
        match self {
            ViewKind::Scalar => Shape::Int,
            ViewKind::IntSet => Shape::IntSet,
            ViewKind::Variable | ViewKind::NegatedVariable | ViewKind::ConstantAsVariable => {
                Shape::IntHandle
            }
            ViewKind::BooleanVariable | ViewKind::NegatedBooleanVariable => Shape::BoolHandle,
            ViewKind::SetVariable => Shape::SetHandle,
            ViewKind::OffsetVariable => Shape::OffsetPair,
            ViewKind::ScaleVariable => Shape::ScalePair,
        }
    }

    /// Whether values of this kind are `(constant, variable)` pairs.
    pub fn is_pair(self) -> bool {
        matches!(self.shape(), Shape::OffsetPair | Shape::ScalePair)
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Declared type of one slot: a view kind nested `depth` arrays deep.
///
/// `depth == 0` is a single value, `depth == 1` an array of values, and so on.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct SlotType {
    pub kind: ViewKind,
    pub depth: u8,
}

impl SlotType {
    pub const fn single(kind: ViewKind) -> Self {
        SlotType { kind, depth: 0 }
    }

    pub const fn array(kind: ViewKind) -> Self {
        SlotType { kind, depth: 1 }
    }

    #[inline]
    pub fn is_array(self) -> bool {
        self.depth > 0
    }

    /// Type of one element of this array type.
    ///
    /// Returns `None` for single-valued types.
    pub fn element(self) -> Option<SlotType> {
        self.depth.checked_sub(1).map(|depth| SlotType {
            kind: self.kind,
            depth,
        })
    }

    /// Slot-level compatibility, lifted from [`ViewKind::compatible`].
    ///
    /// Arrays compare kind-wise and ignore length. An empty actual array
    /// carries no element kind and fits any declared array at least as deep.
    pub fn accepts(self, actual: ActualType) -> bool {
        match actual.kind {
            Some(kind) => self.depth == actual.depth && ViewKind::compatible(self.kind, kind),
            None => actual.depth > 0 && self.depth >= actual.depth,
        }
    }
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.depth {
            f.write_str("]")?;
        }
        f.write_str(self.kind.token())
    }
}

/// Observed type of one argument.
///
/// Arrays report the kind of their first leaf; `kind` is `None` when an
/// empty array is reached before any leaf.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ActualType {
    pub kind: Option<ViewKind>,
    pub depth: u8,
}

impl fmt::Display for ActualType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.depth {
            f.write_str("]")?;
        }
        match self.kind {
            Some(kind) => f.write_str(kind.token()),
            None => f.write_str("_"),
        }
    }
}

/// Observed argument signature of one constraint occurrence.
pub type Signature = SmallVec<[ActualType; 4]>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compatible_is_exact_equality_over_the_whole_catalog() {
        for declared in ViewKind::ALL {
            for actual in ViewKind::ALL {
                assert_eq!(ViewKind::compatible(declared, actual), declared == actual);
            }
        }
    }

    #[test]
    fn constant_never_fills_a_variable_slot() {
        assert!(!ViewKind::compatible(
            ViewKind::Variable,
            ViewKind::ConstantAsVariable
        ));
    }

    #[test]
    fn tokens_round_trip() {
        for kind in ViewKind::ALL {
            assert_eq!(ViewKind::from_token(kind.token()), Some(kind));
        }
        assert_eq!(ViewKind::from_token("floatvar"), None);
    }

    #[test]
    fn pair_kinds() {
        let pairs: Vec<_> = ViewKind::ALL.into_iter().filter(|k| k.is_pair()).collect();
        assert_eq!(
            pairs,
            vec![ViewKind::OffsetVariable, ViewKind::ScaleVariable]
        );
    }

    #[test]
    fn array_slot_ignores_length_and_requires_array() {
        let slot = SlotType::array(ViewKind::Variable);
        assert!(slot.accepts(ActualType {
            kind: Some(ViewKind::Variable),
            depth: 1
        }));
        assert!(!slot.accepts(ActualType {
            kind: Some(ViewKind::Variable),
            depth: 0
        }));
        assert!(!slot.accepts(ActualType {
            kind: Some(ViewKind::OffsetVariable),
            depth: 1
        }));
    }

    #[test]
    fn empty_array_fits_any_array_slot() {
        let empty = ActualType {
            kind: None,
            depth: 1,
        };
        assert!(SlotType::array(ViewKind::Scalar).accepts(empty));
        assert!(SlotType::array(ViewKind::OffsetVariable).accepts(empty));
        assert!(!SlotType::single(ViewKind::Scalar).accepts(empty));
    }

    #[test]
    fn slot_type_display_uses_bracket_prefix() {
        assert_eq!(SlotType::array(ViewKind::OffsetVariable).to_string(), "]offsetvar");
        assert_eq!(SlotType::single(ViewKind::BooleanVariable).to_string(), "boolvar");
        assert_eq!(
            SlotType {
                kind: ViewKind::Scalar,
                depth: 2
            }
            .to_string(),
            "]]int"
        );
    }

    #[test]
    fn element_of_array() {
        assert_eq!(
            SlotType::array(ViewKind::Scalar).element(),
            Some(SlotType::single(ViewKind::Scalar))
        );
        assert_eq!(SlotType::single(ViewKind::Scalar).element(), None);
    }
}
