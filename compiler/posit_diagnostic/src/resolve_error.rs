//! Errors raised while resolving and invoking one constraint.

use posit_ir::{ActualType, SlotType, VarClass, VarId, ViewKind};

use crate::ErrorCode;

/// Result of resolving, marshalling, or invoking one constraint.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Why a constraint could not be reconstructed.
///
/// `definition` is the name of the definition being resolved, or the
/// target operation when a front-end call was compiled without one.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Every variant's declared signature rejected the actual arguments.
    #[error("no variant of `{definition}` accepts arguments ({signature})")]
    NoMatchingVariant {
        definition: String,
        signature: String,
    },

    #[error("malformed spec for `{definition}`: {detail}")]
    MalformedSpec {
        definition: String,
        detail: MalformedDetail,
    },

    /// A variable handle does not name a usable slot in the live store.
    #[error("unresolved variable reference {index}: {reason}")]
    UnresolvedVariableReference {
        index: VarId,
        reason: UnresolvedReason,
    },

    #[error("`{definition}` projects a pair component out of slot {slot}, which holds {found}")]
    ProjectionOnNonPair {
        definition: String,
        slot: usize,
        found: ActualType,
    },

    #[error("no definition named `{name}`")]
    UnknownDefinition { name: String },
}

impl ResolveError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ResolveError::NoMatchingVariant { .. } => ErrorCode::E2001,
            ResolveError::MalformedSpec { .. } => ErrorCode::E2002,
            ResolveError::ProjectionOnNonPair { .. } => ErrorCode::E2003,
            ResolveError::UnknownDefinition { .. } => ErrorCode::E2004,
            ResolveError::UnresolvedVariableReference { .. } => ErrorCode::E3001,
        }
    }

    pub fn malformed(definition: impl Into<String>, detail: MalformedDetail) -> Self {
        ResolveError::MalformedSpec {
            definition: definition.into(),
            detail,
        }
    }

    /// Definition the failure belongs to, when it is known.
    pub fn definition(&self) -> Option<&str> {
        match self {
            ResolveError::NoMatchingVariant { definition, .. }
            | ResolveError::MalformedSpec { definition, .. }
            | ResolveError::ProjectionOnNonPair { definition, .. } => Some(definition),
            ResolveError::UnknownDefinition { name } => Some(name),
            ResolveError::UnresolvedVariableReference { .. } => None,
        }
    }
}

/// Specific shape problem behind a `MalformedSpec`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MalformedDetail {
    #[error("expected {} argument(s), found {found}", join_counts(.expected))]
    ArgumentCount { found: usize, expected: Vec<usize> },

    #[error("slot {slot} expects an array of length {expected}, found {found}")]
    ArrayLength {
        slot: usize,
        expected: usize,
        found: usize,
    },

    #[error("slot {slot} is declared `{expected}` but holds {found}")]
    ElementKind {
        slot: usize,
        expected: SlotType,
        found: ActualType,
    },

    #[error("slot {slot} is referenced by a rule but only {available} argument(s) are present")]
    MissingSlot { slot: usize, available: usize },

    #[error("slot {slot} must hold an array to be concatenated")]
    NotAnArray { slot: usize },

    #[error("cannot concatenate `{first}` elements with `{second}` elements")]
    ConcatenationShape { first: ViewKind, second: ViewKind },

    #[error("element of slot {slot} has no negation")]
    NotNegatable { slot: usize },
}

fn join_counts(counts: &[usize]) -> String {
    let parts: Vec<String> = counts.iter().map(ToString::to_string).collect();
    parts.join(" or ")
}

/// Why a variable handle failed to resolve against the store.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UnresolvedReason {
    #[error("the store holds {size} variable(s)")]
    OutOfRange { size: usize },

    #[error("expected a {expected} variable, the store holds a {found} variable")]
    WrongClass { expected: VarClass, found: VarClass },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_match_names_definition() {
        let err = ResolveError::NoMatchingVariant {
            definition: "int.rel.Nq".to_string(),
            signature: "setvar, setvar".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no variant of `int.rel.Nq` accepts arguments (setvar, setvar)"
        );
        assert_eq!(err.code(), ErrorCode::E2001);
        assert_eq!(err.definition(), Some("int.rel.Nq"));
    }

    #[test]
    fn argument_count_lists_alternatives() {
        let err = ResolveError::malformed(
            "int.Max",
            MalformedDetail::ArgumentCount {
                found: 1,
                expected: vec![2, 3],
            },
        );
        assert_eq!(
            err.to_string(),
            "malformed spec for `int.Max`: expected 2 or 3 argument(s), found 1"
        );
    }

    #[test]
    fn element_kind_uses_registry_tokens() {
        let detail = MalformedDetail::ElementKind {
            slot: 0,
            expected: SlotType::array(ViewKind::OffsetVariable),
            found: ActualType {
                kind: Some(ViewKind::Variable),
                depth: 0,
            },
        };
        assert_eq!(
            detail.to_string(),
            "slot 0 is declared `]offsetvar` but holds intvar"
        );
    }

    #[test]
    fn unresolved_reference_has_no_definition() {
        let err = ResolveError::UnresolvedVariableReference {
            index: VarId::new(9),
            reason: UnresolvedReason::OutOfRange { size: 3 },
        };
        assert_eq!(err.definition(), None);
        assert_eq!(err.code(), ErrorCode::E3001);
        assert_eq!(
            err.to_string(),
            "unresolved variable reference 9: the store holds 3 variable(s)"
        );
    }
}
