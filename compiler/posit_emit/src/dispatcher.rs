//! Dispatcher source rendering.
//!
//! For each definition, renders the routine a code generator emits: test
//! each variant's slot signature in declared order and post the first
//! that matches. The rendered text mirrors what the resolver does at run
//! time, so the generated routine and `posit_dispatch::resolve` agree on
//! every input.

use std::fmt::Write as _;

use posit_ir::{Definition, PairComponent, TransformRule};
use posit_registry::Registry;

/// Identifier-safe form of a definition name (`int.rel.Le` -> `int_rel_Le`).
fn routine_name(definition: &str) -> String {
    let body: String = definition
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("post_{body}")
}

fn rule_expr(rule: &TransformRule) -> String {
    match rule {
        TransformRule::Direct(i) => format!("spec[{i}]"),
        TransformRule::ProjectPair(i, PairComponent::First) => format!("first(spec[{i}])"),
        TransformRule::ProjectPair(i, PairComponent::Second) => format!("second(spec[{i}])"),
        TransformRule::Concatenate(i, j) => format!("concat(spec[{i}], spec[{j}])"),
        TransformRule::ConcatenateNegated(i, j) => {
            format!("concat_negated(spec[{i}], spec[{j}])")
        }
        TransformRule::Gather(slots) => {
            let items: Vec<String> = slots.iter().map(|i| format!("spec[{i}]")).collect();
            format!("{{{}}}", items.join(", "))
        }
        TransformRule::Literal(literal) => literal.to_string(),
    }
}

/// Render the dispatch routine for one definition.
pub fn render_dispatcher(definition: &Definition) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "// {}", definition.name());
    let _ = writeln!(
        out,
        "void {}(Space& home, const ConstraintSpec& spec) {{",
        routine_name(definition.name())
    );
    for variant in definition.variants() {
        let slots: Vec<String> = variant.slots().iter().map(|s| format!("\"{s}\"")).collect();
        let args: Vec<String> = variant.rules().iter().map(rule_expr).collect();
        let _ = writeln!(out, "  if (spec.matches({{{}}})) {{", slots.join(", "));
        let _ = write!(out, "    {}(home", variant.target());
        for arg in &args {
            let _ = write!(out, ", {arg}");
        }
        out.push_str(");\n    return;\n  }\n");
    }
    let _ = writeln!(
        out,
        "  throw NoMatchingVariant(\"{}\");",
        definition.name()
    );
    out.push_str("}\n");
    out
}

/// Render every definition's routine, in registration order.
pub fn render_registry(registry: &Registry) -> String {
    registry
        .definitions()
        .iter()
        .map(render_dispatcher)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Tests use expect for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_variants_in_declared_order() {
        let registry = posit_registry::builtin().expect("built-in table is valid");
        let def = registry.get("int.distinct.Val").expect("registered");
        assert_eq!(
            render_dispatcher(def),
            "\
// int.distinct.Val
void post_int_distinct_Val(Space& home, const ConstraintSpec& spec) {
  if (spec.matches({\"]intvar\"})) {
    distinct(home, spec[0], ICL_VAL);
    return;
  }
  if (spec.matches({\"]offsetvar\"})) {
    distinct(home, first(spec[0]), second(spec[0]), ICL_VAL);
    return;
  }
  throw NoMatchingVariant(\"int.distinct.Val\");
}
"
        );
    }

    #[test]
    fn gather_renders_as_brace_list() {
        assert_eq!(rule_expr(&TransformRule::Gather(vec![0, 2])), "{spec[0], spec[2]}");
    }

    #[test]
    fn empty_definition_only_throws() {
        let def = Definition::new("int.rel.Lex", vec![]);
        let text = render_dispatcher(&def);
        assert!(text.contains("throw NoMatchingVariant(\"int.rel.Lex\");"));
        assert!(!text.contains("matches"));
    }

    #[test]
    fn registry_renders_every_definition() {
        let registry = posit_registry::builtin().expect("built-in table is valid");
        let text = render_registry(&registry);
        assert_eq!(text.matches("void post_").count(), registry.len());
    }
}
