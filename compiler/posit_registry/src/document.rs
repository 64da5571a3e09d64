//! JSON form of a registry.
//!
//! ```json
//! {
//!   "operations": [{ "name": "distinct", "arities": [2, 3] }],
//!   "definitions": [{
//!     "name": "int.distinct.Val",
//!     "variants": [
//!       { "slots": ["]intvar"], "target": "distinct",
//!         "post": [{ "direct": 0 }, { "literal": { "symbol": "ICL_VAL" } }] },
//!       { "slots": ["]offsetvar"], "target": "distinct",
//!         "post": [{ "project": [0, "first"] }, { "project": [0, "second"] },
//!                  { "literal": { "symbol": "ICL_VAL" } }] }
//!     ]
//!   }]
//! }
//! ```

use posit_diagnostic::RegistryError;
use posit_ir::{ArgumentSlot, Definition, TransformRule, Variant};
use serde::{Deserialize, Serialize};

use crate::{Registry, RegistryBuilder};

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryDocument {
    #[serde(default)]
    operations: Vec<OperationEntry>,
    definitions: Vec<DefinitionEntry>,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct OperationEntry {
    name: String,
    arities: Vec<usize>,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct DefinitionEntry {
    name: String,
    #[serde(default)]
    variants: Vec<VariantEntry>,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct VariantEntry {
    slots: Vec<String>,
    post: Vec<TransformRule>,
    target: String,
}

impl Registry {
    /// Parse and validate a registry document.
    ///
    /// `origin` names the document in error messages (usually a path).
    pub fn from_json(text: &str, origin: &str) -> Result<Registry, RegistryError> {
        let doc: RegistryDocument =
            serde_json::from_str(text).map_err(|e| RegistryError::Document {
                origin: origin.to_string(),
                message: e.to_string(),
            })?;

        let mut builder = RegistryBuilder::new();
        for op in doc.operations {
            builder.operation(&op.name, op.arities);
        }
        for def in doc.definitions {
            let mut variants = Vec::with_capacity(def.variants.len());
            for (index, entry) in def.variants.into_iter().enumerate() {
                let slots = entry
                    .slots
                    .iter()
                    .map(|token| token.parse::<ArgumentSlot>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|source| RegistryError::InvalidSlotType {
                        definition: def.name.clone(),
                        variant: index,
                        source,
                    })?;
                variants.push(Variant::new(entry.target, slots, entry.post));
            }
            builder.definition(Definition::new(def.name, variants));
        }
        builder.build()
    }

    /// Render this registry in the form [`Registry::from_json`] reads.
    pub fn to_json(&self) -> Result<String, RegistryError> {
        let doc = RegistryDocument {
            operations: self
                .operations()
                .iter()
                .map(|op| OperationEntry {
                    name: op.name().to_string(),
                    arities: op.arities().to_vec(),
                })
                .collect(),
            definitions: self
                .definitions()
                .iter()
                .map(|def| DefinitionEntry {
                    name: def.name().to_string(),
                    variants: def
                        .variants()
                        .iter()
                        .map(|v| VariantEntry {
                            slots: v.slots().iter().map(ToString::to_string).collect(),
                            post: v.rules().to_vec(),
                            target: v.target().to_string(),
                        })
                        .collect(),
                })
                .collect(),
        };
        serde_json::to_string_pretty(&doc).map_err(|e| RegistryError::Document {
            origin: "registry".to_string(),
            message: e.to_string(),
        })
    }
}
