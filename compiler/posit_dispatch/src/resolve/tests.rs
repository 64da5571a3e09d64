use super::*;
use posit_diagnostic::ErrorCode;
use posit_ir::{ArgumentSlot, Literal, TransformRule, VarId, VarRef, ViewKind};
use pretty_assertions::assert_eq;

use crate::RecordingBackend;

fn v(i: u32) -> VarId {
    VarId::new(i)
}

fn array_def(kinds: &[(ViewKind, &'static str)]) -> Definition {
    let variants = kinds
        .iter()
        .map(|&(kind, target)| {
            Variant::new(
                target,
                vec![ArgumentSlot::array(kind)],
                vec![TransformRule::Direct(0)],
            )
        })
        .collect();
    Definition::new("d", variants)
}

fn registry() -> Registry {
    posit_registry::builtin().expect("built-in table is valid")
}

#[test]
fn first_compatible_variant_wins() {
    let def = array_def(&[(ViewKind::Variable, "first"), (ViewKind::Variable, "second")]);
    let call = resolve(&def, &[ArgumentValue::Array(vec![ArgumentValue::Var(v(0))])])
        .expect("resolves");
    assert_eq!(call.variant_index(), 0);
    assert_eq!(call.target(), "first");
}

#[test]
fn later_variant_selected_when_earlier_rejects() {
    let def = array_def(&[
        (ViewKind::Variable, "plain"),
        (ViewKind::OffsetVariable, "offset"),
    ]);
    let args = [ArgumentValue::Array(vec![
        ArgumentValue::Offset(1, v(0)),
        ArgumentValue::Offset(2, v(1)),
    ])];
    let call = resolve(&def, &args).expect("resolves");
    assert_eq!(call.variant_index(), 1);
    assert_eq!(call.target(), "offset");
}

#[test]
fn empty_array_takes_first_array_variant() {
    let def = array_def(&[
        (ViewKind::OffsetVariable, "offset"),
        (ViewKind::Variable, "plain"),
    ]);
    let call = resolve(&def, &[ArgumentValue::Array(vec![])]).expect("resolves");
    assert_eq!(call.target(), "offset");
    assert_eq!(call.args(), &[ConcreteArgument::Array(vec![])]);
}

#[test]
fn empty_definition_never_matches() {
    let def = Definition::new("int.rel.Lex", vec![]);
    let err = resolve(&def, &[ArgumentValue::Int(1)]).expect_err("no variants");
    assert_eq!(
        err,
        ResolveError::NoMatchingVariant {
            definition: "int.rel.Lex".to_string(),
            signature: "int".to_string(),
        }
    );
}

#[test]
fn no_match_reports_observed_signature() {
    let registry = registry();
    let spec = ConstraintSpec::new(
        "int.rel.Nq",
        vec![ArgumentValue::SetVar(v(0)), ArgumentValue::SetVar(v(1))],
    );
    let err = resolve_by_name(&registry, &spec).expect_err("no set variant");
    assert_eq!(err.to_string(), "no variant of `int.rel.Nq` accepts arguments (setvar, setvar)");
}

#[test]
fn wrong_argument_count_has_no_matching_variant() {
    let registry = registry();
    let spec = ConstraintSpec::new("int.Max", vec![ArgumentValue::Var(v(0))]);
    let err = resolve_by_name(&registry, &spec).expect_err("int.Max takes three");
    assert_eq!(err.code(), ErrorCode::E2001);
    assert_eq!(
        err,
        ResolveError::NoMatchingVariant {
            definition: "int.Max".to_string(),
            signature: "intvar".to_string(),
        }
    );
}

#[test]
fn unknown_definition() {
    let spec = ConstraintSpec::new("int.Nope", vec![]);
    let err = resolve_by_name(&registry(), &spec).expect_err("not registered");
    assert_eq!(
        err,
        ResolveError::UnknownDefinition {
            name: "int.Nope".to_string()
        }
    );
}

#[test]
fn constant_selects_its_own_variant() {
    let registry = registry();
    let spec = ConstraintSpec::new(
        "int.count.EqInt",
        vec![
            ArgumentValue::Array(vec![ArgumentValue::Var(v(0)), ArgumentValue::Var(v(1))]),
            ArgumentValue::Const(3),
            ArgumentValue::Int(1),
        ],
    );
    let call = resolve_by_name(&registry, &spec).expect("resolves");
    assert_eq!(call.variant_index(), 1);
    assert_eq!(call.args()[1], ConcreteArgument::Var(VarRef::Const(3)));
}

#[test]
fn negated_views_post_the_dual_operation() {
    let registry = registry();
    let spec = ConstraintSpec::new(
        "int.Max",
        vec![
            ArgumentValue::Minus(v(0)),
            ArgumentValue::Minus(v(1)),
            ArgumentValue::Minus(v(2)),
        ],
    );
    let call = resolve_by_name(&registry, &spec).expect("resolves");
    assert_eq!(call.target(), "min");
    assert_eq!(
        call.into_args(),
        vec![
            ConcreteArgument::Var(VarRef::Minus(v(0))),
            ConcreteArgument::Var(VarRef::Minus(v(1))),
            ConcreteArgument::Var(VarRef::Minus(v(2))),
        ]
    );
}

#[test]
fn projections_follow_target_parameter_order() {
    let registry = registry();
    let spec = ConstraintSpec::new(
        "int.rel.Nq",
        vec![ArgumentValue::Offset(1, v(0)), ArgumentValue::Offset(-2, v(1))],
    );
    let call = resolve_by_name(&registry, &spec).expect("resolves");
    assert_eq!(call.target(), "my_distinct");
    assert_eq!(
        call.args(),
        &[
            ConcreteArgument::Int(1),
            ConcreteArgument::Int(-2),
            ConcreteArgument::Var(VarRef::Int(v(0))),
            ConcreteArgument::Var(VarRef::Int(v(1))),
            ConcreteArgument::Literal(Literal::Symbol("ICL_DEF".to_string())),
        ]
    );
}

#[test]
fn malformed_element_never_reaches_backend() {
    let registry = registry();
    let spec = ConstraintSpec::new(
        "int.distinct.Val",
        vec![ArgumentValue::Array(vec![
            ArgumentValue::Offset(1, v(0)),
            ArgumentValue::Var(v(1)),
        ])],
    );
    let mut backend = RecordingBackend::default();
    let result = resolve_by_name(&registry, &spec).and_then(|call| call.post(&mut backend));
    assert!(matches!(result, Err(ResolveError::MalformedSpec { .. })));
    assert!(backend.calls.is_empty());
}

#[test]
fn select_variant_is_pure_signature_matching() {
    let registry = registry();
    let def = registry.get("int.bool.Or").expect("registered");
    let sig = signature_of(&[
        ArgumentValue::NotBool(v(0)),
        ArgumentValue::Bool(v(1)),
        ArgumentValue::Bool(v(2)),
    ]);
    let (index, variant) = select_variant(def, &sig).expect("matches");
    assert_eq!(index, 2);
    assert_eq!(variant.rules()[1], TransformRule::Literal(Literal::Symbol("BOT_IMP".to_string())));
}
