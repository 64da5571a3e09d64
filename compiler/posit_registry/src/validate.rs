//! Structural checks on a single variant, from declared types alone.

use posit_diagnostic::{RegistryError, RuleProblem};
use posit_ir::{Shape, SlotType, TransformRule, Variant};

use crate::registry::Operation;

pub(crate) fn check_variant(
    definition: &str,
    index: usize,
    variant: &Variant,
    op: Option<&Operation>,
) -> Result<(), RegistryError> {
    let slots = variant.slots();
    for (rule_index, rule) in variant.rules().iter().enumerate() {
        for slot in rule.slots() {
            if slot >= slots.len() {
                return Err(RegistryError::SlotOutOfRange {
                    definition: definition.to_string(),
                    variant: index,
                    rule: rule_index,
                    slot,
                    slots: slots.len(),
                });
            }
        }
        let ty = |i: usize| slots[i].ty;
        if let Err(problem) = check_rule(rule, ty) {
            return Err(RegistryError::IllFormedRule {
                definition: definition.to_string(),
                variant: index,
                rule: rule_index,
                problem,
            });
        }
    }

    if let Some(op) = op {
        if !op.accepts_arity(variant.arity()) {
            return Err(RegistryError::ArityMismatch {
                definition: definition.to_string(),
                variant: index,
                target: op.name().to_string(),
                found: variant.arity(),
                expected: op.arities().to_vec(),
            });
        }
    }
    Ok(())
}

/// Slot indices have already been range-checked.
fn check_rule(rule: &TransformRule, ty: impl Fn(usize) -> SlotType) -> Result<(), RuleProblem> {
    match rule {
        TransformRule::Direct(_) | TransformRule::Literal(_) => Ok(()),
        TransformRule::ProjectPair(i, _) => {
            let slot = ty(*i);
            if slot.kind.is_pair() {
                Ok(())
            } else {
                Err(RuleProblem::ProjectionOnNonPair { slot })
            }
        }
        TransformRule::Concatenate(i, j) => check_concat(ty(*i), ty(*j)),
        TransformRule::ConcatenateNegated(i, j) => {
            let second = ty(*j);
            check_concat(ty(*i), second)?;
            if matches!(
                second.kind.shape(),
                Shape::IntSet | Shape::SetHandle | Shape::BoolHandle
            ) {
                return Err(RuleProblem::NegationUnsupported { slot: second });
            }
            Ok(())
        }
        TransformRule::Gather(slots) => {
            for &i in slots {
                let slot = ty(i);
                if slot.is_array() {
                    return Err(RuleProblem::GatherOfArray { slot });
                }
            }
            Ok(())
        }
    }
}

fn check_concat(first: SlotType, second: SlotType) -> Result<(), RuleProblem> {
    for slot in [first, second] {
        if !slot.is_array() {
            return Err(RuleProblem::ConcatenationOfSingle { slot });
        }
    }
    if first.depth != second.depth || first.kind.shape() != second.kind.shape() {
        return Err(RuleProblem::ConcatenationShape { first, second });
    }
    Ok(())
}
