//! Reconstruction-time backend: calls posted onto a live model.

use std::fmt;

use posit_diagnostic::{ModelError, ResolveError, ResolveResult, UnresolvedReason};
use posit_dispatch::Backend;
use posit_ir::{ConcreteArgument, ConstraintSpec, VarClass, VarId, Variant};
use serde::{Deserialize, Serialize};

/// One declared variable of a model document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableDecl {
    pub kind: VarClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A persisted model: its variable store and the constraints to rebuild.
///
/// ```json
/// { "variables": [{ "kind": "int", "name": "x" }, { "kind": "bool" }],
///   "constraints": [{ "name": "int.rel.Le", "args": [{ "var": 0 }, { "var": 1 }] }] }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDocument {
    #[serde(default)]
    pub variables: Vec<VariableDecl>,
    #[serde(default)]
    pub constraints: Vec<ConstraintSpec>,
}

impl ModelDocument {
    pub fn from_json(text: &str, origin: &str) -> Result<ModelDocument, ModelError> {
        serde_json::from_str(text).map_err(|e| ModelError::Document {
            origin: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// A fresh model holding this document's variables, in declared order.
    pub fn model(&self) -> Result<Model, ModelError> {
        let mut model = Model::new();
        for decl in &self.variables {
            model.add_var(decl.kind, decl.name.clone())?;
        }
        Ok(model)
    }
}

/// A call the model accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Posted {
    pub target: String,
    pub args: Vec<ConcreteArgument>,
}

impl fmt::Display for Posted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.target)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Variable {
    class: VarClass,
    name: Option<String>,
}

/// Live model: a variable store and the ordered log of posted calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Model {
    variables: Vec<Variable>,
    posted: Vec<Posted>,
}

impl Model {
    pub fn new() -> Self {
        Model::default()
    }

    /// Store a new variable under the next free index.
    pub fn add_var(&mut self, class: VarClass, name: Option<String>) -> Result<VarId, ModelError> {
        let id = next_index(self.variables.len())?;
        self.variables.push(Variable { class, name });
        Ok(id)
    }

    pub fn class_of(&self, id: VarId) -> Option<VarClass> {
        self.variables.get(id.index()).map(|v| v.class)
    }

    pub fn name_of(&self, id: VarId) -> Option<&str> {
        self.variables.get(id.index()).and_then(|v| v.name.as_deref())
    }

    /// Display names for every variable, falling back to `x3`/`b3`/`s3`.
    pub fn names(&self) -> Vec<String> {
        self.variables
            .iter()
            .enumerate()
            .map(|(i, v)| match &v.name {
                Some(name) => name.clone(),
                None => {
                    let letter = match v.class {
                        VarClass::Int => 'x',
                        VarClass::Bool => 'b',
                        VarClass::Set => 's',
                    };
                    format!("{letter}{i}")
                }
            })
            .collect()
    }

    pub fn var_count(&self) -> usize {
        self.variables.len()
    }

    /// Posted calls, in posting order.
    pub fn posted(&self) -> &[Posted] {
        &self.posted
    }

    pub fn backend(&mut self) -> ModelBackend<'_> {
        ModelBackend { model: self }
    }

    /// Every handle in `args` must name a stored variable of its class.
    fn check(&self, args: &[ConcreteArgument]) -> ResolveResult<()> {
        let mut refs = Vec::new();
        for arg in args {
            arg.collect_vars(&mut refs);
        }
        for r in refs {
            let (Some(id), Some(expected)) = (r.var(), r.class()) else {
                continue;
            };
            let reason = match self.class_of(id) {
                None => UnresolvedReason::OutOfRange {
                    size: self.variables.len(),
                },
                Some(found) if found != expected => UnresolvedReason::WrongClass { expected, found },
                Some(_) => continue,
            };
            return Err(ResolveError::UnresolvedVariableReference { index: id, reason });
        }
        Ok(())
    }
}

/// Index for the variable stored after `len` others.
fn next_index(len: usize) -> Result<VarId, ModelError> {
    u32::try_from(len)
        .map(VarId::new)
        .map_err(|_| ModelError::StoreFull { limit: len })
}

/// Posts accepted calls onto a borrowed [`Model`].
///
/// A call is checked in full before it is posted, so a rejected call leaves
/// the model untouched.
pub struct ModelBackend<'m> {
    model: &'m mut Model,
}

impl Backend for ModelBackend<'_> {
    fn accept(&mut self, variant: &Variant, args: &[ConcreteArgument]) -> ResolveResult<()> {
        self.model.check(args)?;
        self.model.posted.push(Posted {
            target: variant.target().to_string(),
            args: args.to_vec(),
        });
        Ok(())
    }
}
