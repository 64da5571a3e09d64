//! Marshalled argument values.
//!
//! A `ConcreteArgument` is the exact value a target operation receives:
//! handles into the variable store, pairs, integers, literals, and arrays
//! of these built element by element.

use std::fmt;

use crate::value::{IntSet, Literal, VarClass, VarId};

/// Handle to a variable as seen through one view.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum VarRef {
    Int(VarId),
    /// `-x` over an integer variable.
    Minus(VarId),
    Bool(VarId),
    /// `!b` over a boolean variable.
    NotBool(VarId),
    Set(VarId),
    /// Constant presented as a variable; refers to no store slot.
    Const(i64),
}

impl VarRef {
    /// Store slot this handle refers to, if any.
    pub fn var(self) -> Option<VarId> {
        match self {
            VarRef::Int(v) | VarRef::Minus(v) | VarRef::Bool(v) | VarRef::NotBool(v) | VarRef::Set(v) => {
                Some(v)
            }
            VarRef::Const(_) => None,
        }
    }

    /// Class of variable the referenced slot must hold.
    pub fn class(self) -> Option<VarClass> {
        match self {
            VarRef::Int(_) | VarRef::Minus(_) => Some(VarClass::Int),
            VarRef::Bool(_) | VarRef::NotBool(_) => Some(VarClass::Bool),
            VarRef::Set(_) => Some(VarClass::Set),
            VarRef::Const(_) => None,
        }
    }

    /// The arithmetic negation `-x` of this handle.
    ///
    /// Negating twice returns the original view. Boolean handles have no
    /// arithmetic negation (`!b` is `1 - b`, not `-b`), set handles have
    /// none, and neither does a constant whose negation overflows.
    pub fn negated(self) -> Option<VarRef> {
        match self {
            VarRef::Int(v) => Some(VarRef::Minus(v)),
            VarRef::Minus(v) => Some(VarRef::Int(v)),
            VarRef::Const(c) => c.checked_neg().map(VarRef::Const),
            VarRef::Bool(_) | VarRef::NotBool(_) | VarRef::Set(_) => None,
        }
    }
}

impl fmt::Display for VarRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarRef::Int(v) => write!(f, "x{v}"),
            VarRef::Minus(v) => write!(f, "-x{v}"),
            VarRef::Bool(v) => write!(f, "b{v}"),
            VarRef::NotBool(v) => write!(f, "!b{v}"),
            VarRef::Set(v) => write!(f, "s{v}"),
            VarRef::Const(c) => write!(f, "#{c}"),
        }
    }
}

/// One marshalled call argument.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ConcreteArgument {
    Int(i64),
    Set(IntSet),
    Literal(Literal),
    Var(VarRef),
    /// `(offset, x)` meaning `offset + x`.
    Offset(i64, VarRef),
    /// `(scale, x)` meaning `scale * x`.
    Scale(i64, VarRef),
    Array(Vec<ConcreteArgument>),
}

impl ConcreteArgument {
    pub fn as_array(&self) -> Option<&[ConcreteArgument]> {
        match self {
            ConcreteArgument::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Append every variable handle in this argument to `out`, depth first.
    pub fn collect_vars(&self, out: &mut Vec<VarRef>) {
        match self {
            ConcreteArgument::Var(r) | ConcreteArgument::Offset(_, r) | ConcreteArgument::Scale(_, r) => {
                out.push(*r);
            }
            ConcreteArgument::Array(items) => {
                for item in items {
                    item.collect_vars(out);
                }
            }
            ConcreteArgument::Int(_) | ConcreteArgument::Set(_) | ConcreteArgument::Literal(_) => {}
        }
    }
}

impl fmt::Display for ConcreteArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConcreteArgument::Int(n) => write!(f, "{n}"),
            ConcreteArgument::Set(s) => write!(f, "{s}"),
            ConcreteArgument::Literal(l) => write!(f, "{l}"),
            ConcreteArgument::Var(r) => write!(f, "{r}"),
            ConcreteArgument::Offset(c, r) => write!(f, "({c} + {r})"),
            ConcreteArgument::Scale(c, r) => write!(f, "({c} * {r})"),
            ConcreteArgument::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}
