//! Marshalling for calls bound to a known variant.
//!
//! A front end that has already decided which variant it is calling skips
//! matching, but the slot signature is still checked: an ill-typed front
//! end gets `MalformedSpec` instead of a wrong call.

use posit_diagnostic::{MalformedDetail, ResolveError, ResolveResult};
use posit_ir::{signature_of, ArgumentValue, ConcreteArgument, Variant};

use crate::{Backend, Marshaller};

/// Marshal `args` for `variant` without consulting any other variant.
///
/// Errors name the variant's target operation.
pub fn compile_bound(
    variant: &Variant,
    args: &[ArgumentValue],
) -> ResolveResult<Vec<ConcreteArgument>> {
    let target = variant.target();
    if args.len() != variant.slots().len() {
        return Err(ResolveError::malformed(
            target,
            MalformedDetail::ArgumentCount {
                found: args.len(),
                expected: vec![variant.slots().len()],
            },
        ));
    }
    let signature = signature_of(args);
    for (slot, (declared, &actual)) in variant.signature().zip(&signature).enumerate() {
        if !declared.accepts(actual) {
            return Err(ResolveError::malformed(
                target,
                MalformedDetail::ElementKind {
                    slot,
                    expected: declared,
                    found: actual,
                },
            ));
        }
    }
    Marshaller::new(target, variant.slots(), args)?.marshal_all(variant.rules())
}

/// [`compile_bound`], then hand the call to `backend`.
pub fn post_bound(
    backend: &mut impl Backend,
    variant: &Variant,
    args: &[ArgumentValue],
) -> ResolveResult<()> {
    let call = compile_bound(variant, args)?;
    backend.accept(variant, &call)
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Tests use expect for brevity")]
mod tests {
    use super::*;
    use posit_ir::{ActualType, ArgumentSlot, Literal, TransformRule, VarId, VarRef, ViewKind};
    use pretty_assertions::assert_eq;

    use crate::RecordingBackend;

    fn linear() -> Variant {
        Variant::new(
            "linear",
            vec![
                ArgumentSlot::array(ViewKind::Variable),
                ArgumentSlot::array(ViewKind::Variable),
                ArgumentSlot::single(ViewKind::Scalar),
            ],
            vec![
                TransformRule::ConcatenateNegated(0, 1),
                TransformRule::Literal(Literal::Symbol("IRT_EQ".to_string())),
                TransformRule::Direct(2),
            ],
        )
    }

    #[test]
    fn bound_call_is_marshalled_without_matching() {
        let args = [
            ArgumentValue::Array(vec![ArgumentValue::Var(VarId::new(0))]),
            ArgumentValue::Array(vec![ArgumentValue::Var(VarId::new(1))]),
            ArgumentValue::Int(5),
        ];
        let mut backend = RecordingBackend::default();
        post_bound(&mut backend, &linear(), &args).expect("compiles");
        assert_eq!(
            backend.calls,
            vec![(
                "linear".to_string(),
                vec![
                    ConcreteArgument::Array(vec![
                        ConcreteArgument::Var(VarRef::Int(VarId::new(0))),
                        ConcreteArgument::Var(VarRef::Minus(VarId::new(1))),
                    ]),
                    ConcreteArgument::Literal(Literal::Symbol("IRT_EQ".to_string())),
                    ConcreteArgument::Int(5),
                ]
            )]
        );
    }

    #[test]
    fn ill_typed_front_end_is_malformed() {
        let args = [
            ArgumentValue::Array(vec![ArgumentValue::Var(VarId::new(0))]),
            ArgumentValue::Var(VarId::new(1)),
            ArgumentValue::Int(5),
        ];
        let err = compile_bound(&linear(), &args).expect_err("slot 1 is single");
        assert_eq!(
            err,
            ResolveError::MalformedSpec {
                definition: "linear".to_string(),
                detail: MalformedDetail::ElementKind {
                    slot: 1,
                    expected: posit_ir::SlotType::array(ViewKind::Variable),
                    found: ActualType {
                        kind: Some(ViewKind::Variable),
                        depth: 0
                    },
                },
            }
        );
    }

    #[test]
    fn bound_call_checks_argument_count() {
        let err = compile_bound(&linear(), &[]).expect_err("no arguments");
        assert_eq!(err.code(), posit_diagnostic::ErrorCode::E2002);
    }
}
