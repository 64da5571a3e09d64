//! Errors raised while building or loading a definition registry.

use posit_ir::{ParseSlotError, SlotType};

use crate::ErrorCode;

/// A registry table that violates the schema invariants.
///
/// `variant` is the zero-based position of the offending variant within
/// its definition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("definition `{name}` is registered twice")]
    DuplicateDefinition { name: String },

    #[error("`{definition}` variant {variant}: rule {rule} reads slot {slot}, but only {slots} slot(s) are declared")]
    SlotOutOfRange {
        definition: String,
        variant: usize,
        rule: usize,
        slot: usize,
        slots: usize,
    },

    #[error("`{definition}` variant {variant}: {source}")]
    InvalidSlotType {
        definition: String,
        variant: usize,
        source: ParseSlotError,
    },

    #[error("`{definition}` variant {variant}: `{target}` takes {} argument(s), the variant supplies {found}", join_arities(.expected))]
    ArityMismatch {
        definition: String,
        variant: usize,
        target: String,
        found: usize,
        expected: Vec<usize>,
    },

    #[error("`{definition}` variant {variant}: rule {rule} {problem}")]
    IllFormedRule {
        definition: String,
        variant: usize,
        rule: usize,
        problem: RuleProblem,
    },

    #[error("cannot load {origin}: {message}")]
    Document { origin: String, message: String },
}

impl RegistryError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RegistryError::DuplicateDefinition { .. } => ErrorCode::E1001,
            RegistryError::SlotOutOfRange { .. } => ErrorCode::E1002,
            RegistryError::InvalidSlotType { .. } => ErrorCode::E1003,
            RegistryError::ArityMismatch { .. } => ErrorCode::E1004,
            RegistryError::IllFormedRule { .. } => ErrorCode::E1005,
            RegistryError::Document { .. } => ErrorCode::E1006,
        }
    }
}

fn join_arities(arities: &[usize]) -> String {
    let parts: Vec<String> = arities.iter().map(ToString::to_string).collect();
    parts.join(" or ")
}

/// Structural problem with one transform rule, detected from declared types.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuleProblem {
    #[error("projects a pair component out of `{slot}`, which is not pair-shaped")]
    ProjectionOnNonPair { slot: SlotType },

    #[error("concatenates `{slot}`, which is not an array")]
    ConcatenationOfSingle { slot: SlotType },

    #[error("concatenates `{first}` with `{second}`, which have different representations")]
    ConcatenationShape { first: SlotType, second: SlotType },

    #[error("negates `{slot}`, which has no negation")]
    NegationUnsupported { slot: SlotType },

    #[error("gathers `{slot}`, which is not single-valued")]
    GatherOfArray { slot: SlotType },
}

#[cfg(test)]
mod tests {
    use super::*;
    use posit_ir::ViewKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn arity_mismatch_message() {
        let err = RegistryError::ArityMismatch {
            definition: "int.Max".to_string(),
            variant: 1,
            target: "min".to_string(),
            found: 4,
            expected: vec![3],
        };
        assert_eq!(
            err.to_string(),
            "`int.Max` variant 1: `min` takes 3 argument(s), the variant supplies 4"
        );
        assert_eq!(err.code(), ErrorCode::E1004);
    }

    #[test]
    fn ill_formed_concatenation_names_both_operands() {
        let err = RegistryError::IllFormedRule {
            definition: "int.linear.Mixed".to_string(),
            variant: 0,
            rule: 0,
            problem: RuleProblem::ConcatenationShape {
                first: SlotType::array(ViewKind::Scalar),
                second: SlotType::array(ViewKind::OffsetVariable),
            },
        };
        assert_eq!(
            err.to_string(),
            "`int.linear.Mixed` variant 0: rule 0 concatenates `]int` with `]offsetvar`, which have different representations"
        );
    }
}
