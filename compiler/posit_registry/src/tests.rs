use super::*;
use posit_diagnostic::{ErrorCode, RegistryError, RuleProblem};
use posit_ir::{
    ArgumentSlot, Definition, Literal, PairComponent, SlotType, TransformRule, Variant, ViewKind,
};
use pretty_assertions::assert_eq;

fn variant(target: &str, slots: Vec<ArgumentSlot>, rules: Vec<TransformRule>) -> Variant {
    Variant::new(target, slots, rules)
}

fn build_one(variant: Variant) -> Result<Registry, RegistryError> {
    Registry::builder()
        .operation("rel", [3, 4])
        .definition(Definition::new("d", vec![variant]))
        .build()
}

#[test]
fn builtin_registry_builds() {
    let registry = builtin().expect("built-in table is valid");
    let max = registry.get("int.Max").expect("int.Max is registered");
    let targets: Vec<_> = max.variants().iter().map(Variant::target).collect();
    assert_eq!(targets, vec!["max", "min"]);
    assert!(registry.contains("int.rel.Lex"));
    assert!(registry.get("int.rel.Lex").expect("registered").variants().is_empty());
    assert!(!registry.contains("int.Nope"));
}

#[test]
fn definitions_keep_registration_order() {
    let registry = Registry::builder()
        .definition(Definition::new("b", vec![]))
        .definition(Definition::new("a", vec![]))
        .build()
        .expect("valid");
    let names: Vec<_> = registry.definitions().iter().map(Definition::name).collect();
    assert_eq!(names, vec!["b", "a"]);
    assert_eq!(registry.len(), 2);
}

#[test]
fn duplicate_definition_is_rejected() {
    let err = Registry::builder()
        .definition(Definition::new("int.rel.Le", vec![]))
        .definition(Definition::new("int.rel.Le", vec![]))
        .build()
        .expect_err("duplicate");
    assert_eq!(
        err,
        RegistryError::DuplicateDefinition {
            name: "int.rel.Le".to_string()
        }
    );
    assert_eq!(err.code(), ErrorCode::E1001);
}

#[test]
fn rule_reading_missing_slot_is_rejected() {
    let err = build_one(variant(
        "rel",
        vec![ArgumentSlot::single(ViewKind::Variable)],
        vec![
            TransformRule::Direct(0),
            TransformRule::Literal(Literal::Symbol("IRT_LE".to_string())),
            TransformRule::Direct(1),
        ],
    ))
    .expect_err("slot 1 is missing");
    assert_eq!(
        err,
        RegistryError::SlotOutOfRange {
            definition: "d".to_string(),
            variant: 0,
            rule: 2,
            slot: 1,
            slots: 1,
        }
    );
}

#[test]
fn arity_is_checked_against_declared_operation() {
    let err = build_one(variant(
        "rel",
        vec![ArgumentSlot::single(ViewKind::Variable)],
        vec![TransformRule::Direct(0), TransformRule::Direct(0)],
    ))
    .expect_err("rel takes 3 or 4");
    assert_eq!(err.code(), ErrorCode::E1004);
    assert_eq!(
        err.to_string(),
        "`d` variant 0: `rel` takes 3 or 4 argument(s), the variant supplies 2"
    );
}

#[test]
fn undeclared_target_skips_arity_check() {
    let registry = build_one(variant(
        "custom",
        vec![ArgumentSlot::single(ViewKind::Variable)],
        vec![TransformRule::Direct(0)],
    ));
    assert!(registry.is_ok());
}

#[test]
fn projection_needs_pair_slot() {
    let err = build_one(variant(
        "custom",
        vec![ArgumentSlot::array(ViewKind::Variable)],
        vec![TransformRule::ProjectPair(0, PairComponent::First)],
    ))
    .expect_err("intvar is not a pair");
    assert_eq!(
        err,
        RegistryError::IllFormedRule {
            definition: "d".to_string(),
            variant: 0,
            rule: 0,
            problem: RuleProblem::ProjectionOnNonPair {
                slot: SlotType::array(ViewKind::Variable)
            },
        }
    );
}

#[test]
fn concatenation_checks_operands() {
    let single = build_one(variant(
        "custom",
        vec![
            ArgumentSlot::array(ViewKind::Scalar),
            ArgumentSlot::single(ViewKind::Scalar),
        ],
        vec![TransformRule::Concatenate(0, 1)],
    ))
    .expect_err("second operand is single");
    assert!(matches!(
        single,
        RegistryError::IllFormedRule {
            problem: RuleProblem::ConcatenationOfSingle { .. },
            ..
        }
    ));

    let mixed = build_one(variant(
        "custom",
        vec![
            ArgumentSlot::array(ViewKind::Scalar),
            ArgumentSlot::array(ViewKind::OffsetVariable),
        ],
        vec![TransformRule::Concatenate(0, 1)],
    ))
    .expect_err("mixed representations");
    assert!(matches!(
        mixed,
        RegistryError::IllFormedRule {
            problem: RuleProblem::ConcatenationShape { .. },
            ..
        }
    ));
}

#[test]
fn handle_views_of_one_class_concatenate() {
    let ok = build_one(variant(
        "custom",
        vec![
            ArgumentSlot::array(ViewKind::Variable),
            ArgumentSlot::array(ViewKind::NegatedVariable),
        ],
        vec![TransformRule::ConcatenateNegated(0, 1)],
    ));
    assert!(ok.is_ok());
}

#[test]
fn set_elements_cannot_be_negated() {
    let err = build_one(variant(
        "custom",
        vec![
            ArgumentSlot::array(ViewKind::SetVariable),
            ArgumentSlot::array(ViewKind::SetVariable),
        ],
        vec![TransformRule::ConcatenateNegated(0, 1)],
    ))
    .expect_err("sets have no negation");
    assert!(matches!(
        err,
        RegistryError::IllFormedRule {
            problem: RuleProblem::NegationUnsupported { .. },
            ..
        }
    ));
}

#[test]
fn boolean_elements_cannot_be_negated() {
    for kind in [ViewKind::BooleanVariable, ViewKind::NegatedBooleanVariable] {
        let err = build_one(variant(
            "custom",
            vec![ArgumentSlot::array(kind), ArgumentSlot::array(kind)],
            vec![TransformRule::ConcatenateNegated(0, 1)],
        ))
        .expect_err("booleans have no arithmetic negation");
        assert!(matches!(
            err,
            RegistryError::IllFormedRule {
                problem: RuleProblem::NegationUnsupported { .. },
                ..
            }
        ));
    }
}

#[test]
fn gather_reads_single_slots_only() {
    let err = build_one(variant(
        "custom",
        vec![
            ArgumentSlot::single(ViewKind::BooleanVariable),
            ArgumentSlot::array(ViewKind::BooleanVariable),
        ],
        vec![TransformRule::Gather(vec![0, 1])],
    ))
    .expect_err("slot 1 is an array");
    assert!(matches!(
        err,
        RegistryError::IllFormedRule {
            problem: RuleProblem::GatherOfArray { .. },
            ..
        }
    ));
}

#[test]
fn operation_arities_merge() {
    let registry = Registry::builder()
        .operation("rel", [4, 3])
        .operation("rel", [5, 3])
        .build()
        .expect("valid");
    let rel = registry.operation("rel").expect("declared");
    assert_eq!(rel.arities(), &[3, 4, 5]);
    assert!(rel.accepts_arity(4));
    assert!(!rel.accepts_arity(2));
}

const DOCUMENT: &str = r#"{
  "operations": [{ "name": "distinct", "arities": [2, 3] }],
  "definitions": [{
    "name": "int.distinct.Val",
    "variants": [
      { "slots": ["]intvar"], "target": "distinct",
        "post": [{ "direct": 0 }, { "literal": { "symbol": "ICL_VAL" } }] },
      { "slots": ["]offsetvar"], "target": "distinct",
        "post": [{ "project": [0, "first"] }, { "project": [0, "second"] },
                 { "literal": { "symbol": "ICL_VAL" } }] }
    ]
  }]
}"#;

#[test]
fn loads_json_document() {
    let registry = Registry::from_json(DOCUMENT, "inline").expect("valid document");
    let def = registry.get("int.distinct.Val").expect("registered");
    assert_eq!(def.variants().len(), 2);
    assert_eq!(
        def.variants()[1].rules(),
        &[
            TransformRule::ProjectPair(0, PairComponent::First),
            TransformRule::ProjectPair(0, PairComponent::Second),
            TransformRule::Literal(Literal::Symbol("ICL_VAL".to_string())),
        ]
    );
    assert_eq!(def.variants()[1].to_string(), "(]offsetvar) -> distinct");
}

#[test]
fn bad_slot_token_names_variant() {
    let text = DOCUMENT.replace("]offsetvar", "]floatvar");
    let err = Registry::from_json(&text, "inline").expect_err("unknown kind");
    assert_eq!(err.code(), ErrorCode::E1003);
    assert!(matches!(err, RegistryError::InvalidSlotType { variant: 1, .. }));
}

#[test]
fn unreadable_document_reports_origin() {
    let err = Registry::from_json("{ \"definitions\": 3 }", "reg.json").expect_err("not a list");
    assert_eq!(err.code(), ErrorCode::E1006);
    assert!(err.to_string().starts_with("cannot load reg.json: "));
}

#[test]
fn builtin_survives_json_rendering() {
    let registry = builtin().expect("valid");
    let text = registry.to_json().expect("renders");
    let reloaded = Registry::from_json(&text, "rendered").expect("reloads");
    assert_eq!(reloaded.definitions(), registry.definitions());
    assert_eq!(reloaded.operations(), registry.operations());
}
