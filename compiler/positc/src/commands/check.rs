//! The `check` and `registry` commands: validate and print a registry.

use std::fmt::Write;

use super::{CliError, RegistrySource};

/// Validate a registry and summarize its contents.
pub fn check_registry(source: &RegistrySource) -> Result<String, CliError> {
    let registry = source.load()?;
    let variants: usize = registry
        .definitions()
        .iter()
        .map(|def| def.variants().len())
        .sum();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "registry ok: {} definition(s), {variants} variant(s), {} operation(s)",
        registry.len(),
        registry.operations().len()
    );
    for def in registry.definitions() {
        if def.variants().is_empty() {
            let _ = writeln!(out, "  note: `{}` has no variants and can never resolve", def.name());
        }
    }
    Ok(out)
}

/// Print a registry in its JSON document form.
pub fn dump_registry(source: &RegistrySource) -> Result<String, CliError> {
    let registry = source.load()?;
    let mut json = registry.to_json()?;
    json.push('\n');
    Ok(json)
}
