//! Built-in registry table.
//!
//! A representative slice of the integer, boolean, and set constraint
//! definitions, each listing its variants from most specific to most
//! general. Dual views (`minusvar`, `negboolvar`) are mapped onto the dual
//! operation, so `max` over negated views posts `min`.

use posit_diagnostic::RegistryError;
use posit_ir::{ArgumentSlot, Definition, Literal, PairComponent, TransformRule, ViewKind};

use crate::{Registry, RegistryBuilder};

use TransformRule::{Concatenate, ConcatenateNegated, Direct, Gather, ProjectPair};
use ViewKind::{
    BooleanVariable, ConstantAsVariable, IntSet, NegatedBooleanVariable, NegatedVariable,
    OffsetVariable, Scalar, ScaleVariable, SetVariable, Variable,
};

fn one(kind: ViewKind) -> ArgumentSlot {
    ArgumentSlot::single(kind)
}

fn many(kind: ViewKind) -> ArgumentSlot {
    ArgumentSlot::array(kind)
}

fn sym(name: &str) -> TransformRule {
    TransformRule::Literal(Literal::Symbol(name.to_string()))
}

fn yes() -> TransformRule {
    TransformRule::Literal(Literal::Bool(true))
}

fn first(slot: usize) -> TransformRule {
    ProjectPair(slot, PairComponent::First)
}

fn second(slot: usize) -> TransformRule {
    ProjectPair(slot, PairComponent::Second)
}

/// Build the built-in registry.
pub fn builtin() -> Result<Registry, RegistryError> {
    let mut b = RegistryBuilder::new();
    operations(&mut b);
    int_definitions(&mut b);
    bool_definitions(&mut b);
    linear_definitions(&mut b);
    set_definitions(&mut b);
    b.build()
}

fn operations(b: &mut RegistryBuilder) {
    b.operation("abs", [3])
        .operation("cardinality", [2])
        .operation("count", [4])
        .operation("distinct", [2, 3])
        .operation("dom", [3])
        .operation("element", [3, 4])
        .operation("linear", [3])
        .operation("max", [2, 3])
        .operation("min", [2, 3])
        .operation("mult", [3])
        .operation("my_distinct", [5, 7])
        .operation("rel", [3, 4, 5])
        .operation("sequence", [1])
        .operation("weights", [4]);
}

fn int_definitions(b: &mut RegistryBuilder) {
    for (name, level) in [
        ("int.distinct.Val", "ICL_VAL"),
        ("int.distinct.Bnd", "ICL_BND"),
        ("int.distinct.Dom", "ICL_DOM"),
    ] {
        b.define(
            name,
            [
                (vec![many(Variable)], "distinct", vec![Direct(0), sym(level)]),
                (
                    vec![many(OffsetVariable)],
                    "distinct",
                    vec![first(0), second(0), sym(level)],
                ),
            ],
        );
    }

    b.define(
        "int.distinct.TerDom",
        [
            (
                vec![one(Variable), one(Variable), one(Variable)],
                "distinct",
                vec![Gather(vec![0, 1, 2]), sym("ICL_DOM")],
            ),
            (
                vec![one(OffsetVariable), one(OffsetVariable), one(OffsetVariable)],
                "my_distinct",
                vec![
                    first(0),
                    first(1),
                    first(2),
                    second(0),
                    second(1),
                    second(2),
                    sym("ICL_DOM"),
                ],
            ),
        ],
    );

    b.define(
        "int.AbsBnd",
        [(
            vec![one(Variable), one(Variable)],
            "abs",
            vec![Direct(0), Direct(1), sym("ICL_BND")],
        )],
    );

    b.define(
        "int.Max",
        [
            (
                vec![one(Variable), one(Variable), one(Variable)],
                "max",
                vec![Direct(0), Direct(1), Direct(2)],
            ),
            (
                vec![one(NegatedVariable), one(NegatedVariable), one(NegatedVariable)],
                "min",
                vec![Direct(0), Direct(1), Direct(2)],
            ),
        ],
    );

    b.define(
        "int.NaryMax",
        [
            (
                vec![many(Variable), one(Variable)],
                "max",
                vec![Direct(0), Direct(1)],
            ),
            (
                vec![many(NegatedVariable), one(NegatedVariable)],
                "min",
                vec![Direct(0), Direct(1)],
            ),
        ],
    );

    let mult = vec![Direct(0), Direct(1), Direct(2)];
    b.define(
        "int.MultPlus",
        [
            (
                vec![one(Variable), one(Variable), one(Variable)],
                "mult",
                mult.clone(),
            ),
            (
                vec![one(NegatedVariable), one(NegatedVariable), one(Variable)],
                "mult",
                mult.clone(),
            ),
            (
                vec![one(NegatedVariable), one(Variable), one(NegatedVariable)],
                "mult",
                mult,
            ),
        ],
    );

    b.define(
        "int.count.EqInt",
        [
            (
                vec![many(Variable), one(Variable), one(Scalar)],
                "count",
                vec![Direct(0), Direct(1), sym("IRT_EQ"), Direct(2)],
            ),
            (
                vec![many(Variable), one(ConstantAsVariable), one(Scalar)],
                "count",
                vec![Direct(0), Direct(1), sym("IRT_EQ"), Direct(2)],
            ),
            (
                vec![many(OffsetVariable), one(ConstantAsVariable), one(Scalar)],
                "count",
                vec![second(0), first(0), sym("IRT_EQ"), Direct(2)],
            ),
        ],
    );

    let mut element = Vec::new();
    for index in [Variable, OffsetVariable] {
        for result in [Variable, BooleanVariable, ConstantAsVariable] {
            let rules = if index == OffsetVariable {
                vec![Direct(2), second(0), Direct(1), first(0)]
            } else {
                vec![Direct(2), Direct(0), Direct(1)]
            };
            element.push((vec![one(index), one(result), many(Scalar)], "element", rules));
        }
    }
    b.define("int.element.Int", element);

    b.define(
        "int.rel.Le",
        [(
            vec![one(Variable), one(Variable)],
            "rel",
            vec![Direct(0), sym("IRT_LE"), Direct(1)],
        )],
    );

    b.define(
        "int.rel.Lq",
        [
            (
                vec![one(Variable), one(Variable)],
                "rel",
                vec![Direct(0), sym("IRT_LQ"), Direct(1)],
            ),
            (
                vec![one(BooleanVariable), one(BooleanVariable)],
                "rel",
                vec![Direct(0), sym("IRT_LQ"), Direct(1)],
            ),
        ],
    );

    b.define(
        "int.rel.Nq",
        [
            (
                vec![one(Variable), one(Variable)],
                "rel",
                vec![Direct(0), sym("IRT_NQ"), Direct(1)],
            ),
            (
                vec![one(OffsetVariable), one(OffsetVariable)],
                "my_distinct",
                vec![first(0), first(1), second(0), second(1), sym("ICL_DEF")],
            ),
        ],
    );

    b.define(
        "int.rel.NaryNq",
        [
            (
                vec![many(Variable)],
                "rel",
                vec![Direct(0), sym("IRT_NQ"), sym("ICL_DOM")],
            ),
            (
                vec![many(BooleanVariable)],
                "rel",
                vec![Direct(0), sym("IRT_NQ"), sym("ICL_DOM")],
            ),
        ],
    );

    b.define(
        "int.rel.NaryEqBnd",
        [
            (
                vec![many(Variable)],
                "rel",
                vec![Direct(0), sym("IRT_EQ"), sym("ICL_BND")],
            ),
            (
                vec![many(Variable), many(Variable)],
                "rel",
                vec![Concatenate(0, 1), sym("IRT_EQ"), sym("ICL_BND")],
            ),
        ],
    );

    b.define(
        "int.dom.ReIntSet",
        [(
            vec![one(Variable), one(BooleanVariable), one(IntSet)],
            "dom",
            vec![Direct(0), Direct(2), Direct(1)],
        )],
    );

    // Persisted by older models but never given a variant.
    b.definition(Definition::new("int.rel.Lex", Vec::new()));
}

fn bool_definitions(b: &mut RegistryBuilder) {
    b.define(
        "int.bool.Eq",
        [
            (
                vec![one(BooleanVariable), one(BooleanVariable)],
                "rel",
                vec![Direct(0), sym("BOT_EQV"), Direct(1), yes()],
            ),
            (
                vec![one(BooleanVariable), one(NegatedBooleanVariable)],
                "rel",
                vec![Direct(0), sym("BOT_XOR"), Direct(1), yes()],
            ),
        ],
    );

    let or = |op: &str| vec![Direct(0), sym(op), Direct(1), Direct(2)];
    b.define(
        "int.bool.Or",
        [
            (
                vec![one(BooleanVariable), one(BooleanVariable), one(BooleanVariable)],
                "rel",
                or("BOT_OR"),
            ),
            (
                vec![
                    one(NegatedBooleanVariable),
                    one(NegatedBooleanVariable),
                    one(NegatedBooleanVariable),
                ],
                "rel",
                or("BOT_AND"),
            ),
            (
                vec![
                    one(NegatedBooleanVariable),
                    one(BooleanVariable),
                    one(BooleanVariable),
                ],
                "rel",
                or("BOT_IMP"),
            ),
        ],
    );

    b.define(
        "int.bool.NaryOr",
        [
            (
                vec![many(BooleanVariable), one(BooleanVariable)],
                "rel",
                vec![Direct(0), sym("BOT_OR"), Direct(1)],
            ),
            (
                vec![many(NegatedBooleanVariable), one(NegatedBooleanVariable)],
                "rel",
                vec![Direct(0), sym("BOT_AND"), Direct(1)],
            ),
        ],
    );

    for (name, width) in [("int.bool.TerOrTrue", 3), ("int.bool.QuadOrTrue", 4)] {
        let slots: Vec<usize> = (0..width).collect();
        b.define(
            name,
            [
                (
                    vec![one(BooleanVariable); width],
                    "rel",
                    vec![Gather(slots.clone()), sym("BOT_OR"), yes()],
                ),
                (
                    vec![one(NegatedBooleanVariable); width],
                    "rel",
                    vec![Gather(slots), sym("BOT_AND"), yes()],
                ),
            ],
        );
    }
}

/// Linear forms split into positive and negative terms; the negative side
/// is folded in with a negating concatenation.
fn linear_definitions(b: &mut RegistryBuilder) {
    for (name, relation) in [("int.linear.Eq", "IRT_EQ"), ("int.linear.Lq", "IRT_LQ")] {
        b.define(
            name,
            [
                (
                    vec![many(Variable), many(Variable), one(Scalar)],
                    "linear",
                    vec![ConcatenateNegated(0, 1), sym(relation), Direct(2)],
                ),
                (
                    vec![many(ScaleVariable), many(ScaleVariable), one(Scalar)],
                    "linear",
                    vec![ConcatenateNegated(0, 1), sym(relation), Direct(2)],
                ),
            ],
        );
    }
}

fn set_definitions(b: &mut RegistryBuilder) {
    for (name, relation) in [("set.rel.Eq", "SRT_EQ"), ("set.rel.Distinct", "SRT_NQ")] {
        b.define(
            name,
            [(
                vec![one(SetVariable), one(SetVariable)],
                "rel",
                vec![Direct(0), sym(relation), Direct(1)],
            )],
        );
    }

    b.define(
        "set.relop.Union",
        [(
            vec![one(SetVariable), one(SetVariable), one(SetVariable)],
            "rel",
            vec![Direct(0), sym("SOT_UNION"), Direct(1), sym("SRT_EQ"), Direct(2)],
        )],
    );

    b.define(
        "set.relop.UnionN",
        [(
            vec![many(SetVariable), one(SetVariable), one(IntSet)],
            "rel",
            vec![sym("SOT_UNION"), Direct(0), Direct(2), Direct(1)],
        )],
    );

    b.define(
        "set.int.Card",
        [(
            vec![one(SetVariable), one(Variable)],
            "cardinality",
            vec![Direct(0), Direct(1)],
        )],
    );

    b.define(
        "set.int.Weights",
        [(
            vec![many(Scalar), many(Scalar), one(SetVariable), one(Variable)],
            "weights",
            vec![Direct(0), Direct(1), Direct(2), Direct(3)],
        )],
    );

    b.define(
        "set.sequence.Sequence",
        [(vec![many(SetVariable)], "sequence", vec![Direct(0)])],
    );
}
