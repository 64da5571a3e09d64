//! Variant resolution.
//!
//! Variants are tried in declared order and the first whose every slot
//! accepts the observed argument type wins. Later variants are never
//! consulted once one matches, even if they would fit "better": definitions
//! list their variants from most specific to most general, and that order
//! is trusted as-is.

use posit_diagnostic::{ResolveError, ResolveResult};
use posit_ir::{
    signature_of, ActualType, ArgumentValue, ConcreteArgument, ConstraintSpec, Definition, Variant,
};
use posit_registry::Registry;

use crate::{Backend, Marshaller};

/// A variant chosen for one constraint, with its marshalled call arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedCall<'r> {
    definition: &'r Definition,
    index: usize,
    args: Vec<ConcreteArgument>,
}

impl<'r> ResolvedCall<'r> {
    pub fn definition(&self) -> &'r Definition {
        self.definition
    }

    /// Position of the selected variant within its definition.
    pub fn variant_index(&self) -> usize {
        self.index
    }

    pub fn variant(&self) -> &'r Variant {
        &self.definition.variants()[self.index]
    }

    pub fn target(&self) -> &'r str {
        self.variant().target()
    }

    pub fn args(&self) -> &[ConcreteArgument] {
        &self.args
    }

    pub fn into_args(self) -> Vec<ConcreteArgument> {
        self.args
    }

    /// Hand the call to `backend`.
    pub fn post(&self, backend: &mut impl Backend) -> ResolveResult<()> {
        backend.accept(self.variant(), &self.args)
    }
}

/// Pick the first variant of `definition` that accepts `signature`.
///
/// Pure signature matching: payloads are not inspected beyond their
/// observed types.
pub fn select_variant<'d>(
    definition: &'d Definition,
    signature: &[ActualType],
) -> ResolveResult<(usize, &'d Variant)> {
    for (index, variant) in definition.variants().iter().enumerate() {
        if accepts(variant, signature) {
            return Ok((index, variant));
        }
        tracing::trace!(
            definition = definition.name(),
            variant = index,
            declared = %variant,
            "variant rejected"
        );
    }
    Err(no_match(definition, signature))
}

fn accepts(variant: &Variant, signature: &[ActualType]) -> bool {
    variant.slots().len() == signature.len()
        && variant
            .signature()
            .zip(signature)
            .all(|(declared, &actual)| declared.accepts(actual))
}

fn no_match(definition: &Definition, signature: &[ActualType]) -> ResolveError {
    let rendered: Vec<String> = signature.iter().map(ToString::to_string).collect();
    ResolveError::NoMatchingVariant {
        definition: definition.name().to_string(),
        signature: rendered.join(", "),
    }
}

/// Select a variant for `args` and marshal every call argument.
///
/// Nothing is handed to a backend here; a returned call is complete.
#[tracing::instrument(level = "debug", skip_all, fields(definition = definition.name()))]
pub fn resolve<'d>(
    definition: &'d Definition,
    args: &[ArgumentValue],
) -> ResolveResult<ResolvedCall<'d>> {
    let signature = signature_of(args);
    let (index, variant) = select_variant(definition, &signature)?;
    let marshaller = Marshaller::new(definition.name(), variant.slots(), args)?;
    let args = marshaller.marshal_all(variant.rules())?;
    tracing::debug!(variant = index, target = variant.target(), "resolved");
    Ok(ResolvedCall {
        definition,
        index,
        args,
    })
}

/// Look `spec`'s definition up in `registry`, then [`resolve`] it.
pub fn resolve_by_name<'r>(
    registry: &'r Registry,
    spec: &ConstraintSpec,
) -> ResolveResult<ResolvedCall<'r>> {
    let definition = registry
        .get(&spec.name)
        .ok_or_else(|| ResolveError::UnknownDefinition {
            name: spec.name.clone(),
        })?;
    resolve(definition, &spec.args)
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Tests use expect for brevity")]
mod tests;
