use posit_diagnostic::RegistryError;
use posit_ir::{ArgumentSlot, Definition, TransformRule, Variant};
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::registry::{Operation, Registry};
use crate::validate::check_variant;

/// Collects operations and definitions, then validates them in one pass.
///
/// Registration order is preserved: definitions are listed in the order
/// they were added, and each definition keeps its variants in the order
/// given. Declaring the same operation twice merges its arities.
#[derive(Clone, Debug, Default)]
pub struct RegistryBuilder {
    operations: Vec<Operation>,
    definitions: Vec<Definition>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        RegistryBuilder::default()
    }

    /// Declare a target operation and the argument counts it accepts.
    pub fn operation(
        &mut self,
        name: &str,
        arities: impl IntoIterator<Item = usize>,
    ) -> &mut Self {
        let op = Operation::new(name, arities);
        match self.operations.iter_mut().find(|o| o.name() == name) {
            Some(existing) => existing.extend_arities(op.arities()),
            None => self.operations.push(op),
        }
        self
    }

    pub fn definition(&mut self, definition: Definition) -> &mut Self {
        self.definitions.push(definition);
        self
    }

    /// Shorthand for a definition whose variants are listed inline.
    pub fn define(
        &mut self,
        name: &str,
        variants: impl IntoIterator<Item = (Vec<ArgumentSlot>, &'static str, Vec<TransformRule>)>,
    ) -> &mut Self {
        let variants = variants
            .into_iter()
            .map(|(slots, target, rules)| Variant::new(target, slots, rules))
            .collect();
        self.definition(Definition::new(name, variants))
    }

    /// Validate everything registered so far and freeze it.
    pub fn build(&self) -> Result<Registry, RegistryError> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for def in &self.definitions {
            if !seen.insert(def.name()) {
                return Err(RegistryError::DuplicateDefinition {
                    name: def.name().to_string(),
                });
            }
            for (index, variant) in def.variants().iter().enumerate() {
                let op = self.operations.iter().find(|o| o.name() == variant.target());
                check_variant(def.name(), index, variant, op)?;
            }
        }
        debug!(
            definitions = self.definitions.len(),
            operations = self.operations.len(),
            "registry built"
        );
        Ok(Registry::from_parts(
            self.definitions.clone(),
            self.operations.clone(),
        ))
    }
}
