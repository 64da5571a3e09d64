use posit_ir::Definition;
use rustc_hash::FxHashMap;

use crate::RegistryBuilder;

/// A target operation and the argument counts it accepts.
///
/// Several arities model an overloaded operation such as `rel`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Operation {
    name: Box<str>,
    arities: Vec<usize>,
}

impl Operation {
    pub fn new(name: impl Into<Box<str>>, arities: impl IntoIterator<Item = usize>) -> Self {
        let mut arities: Vec<usize> = arities.into_iter().collect();
        arities.sort_unstable();
        arities.dedup();
        Operation {
            name: name.into(),
            arities,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Accepted argument counts, ascending.
    pub fn arities(&self) -> &[usize] {
        &self.arities
    }

    pub fn accepts_arity(&self, arity: usize) -> bool {
        self.arities.binary_search(&arity).is_ok()
    }

    pub(crate) fn extend_arities(&mut self, more: &[usize]) {
        self.arities.extend_from_slice(more);
        self.arities.sort_unstable();
        self.arities.dedup();
    }
}

/// Validated, read-only table of definitions.
///
/// Definitions keep their registration order; lookups go through an
/// `FxHashMap` name index.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    definitions: Vec<Definition>,
    by_name: FxHashMap<Box<str>, usize>,
    operations: Vec<Operation>,
    ops_by_name: FxHashMap<Box<str>, usize>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Assemble a registry from parts the builder has already validated.
    pub(crate) fn from_parts(definitions: Vec<Definition>, operations: Vec<Operation>) -> Self {
        let by_name = definitions
            .iter()
            .enumerate()
            .map(|(i, def)| (Box::from(def.name()), i))
            .collect();
        let ops_by_name = operations
            .iter()
            .enumerate()
            .map(|(i, op)| (Box::from(op.name()), i))
            .collect();
        Registry {
            definitions,
            by_name,
            operations,
            ops_by_name,
        }
    }

    /// Look up a definition by name.
    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.by_name.get(name).map(|&i| &self.definitions[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// All definitions, in registration order.
    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.ops_by_name.get(name).map(|&i| &self.operations[i])
    }

    /// Declared target operations, in declaration order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
