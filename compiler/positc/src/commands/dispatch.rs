//! The `dispatch` command: print generated dispatch routines.

use posit_diagnostic::ResolveError;
use posit_emit::{render_dispatcher, render_registry};

use super::{CliError, RegistrySource};

/// Render the dispatch routine for one definition, or for all of them.
pub fn render_dispatch(source: &RegistrySource, name: Option<&str>) -> Result<String, CliError> {
    let registry = source.load()?;
    match name {
        None => Ok(render_registry(&registry)),
        Some(name) => registry
            .get(name)
            .map(render_dispatcher)
            .ok_or_else(|| {
                ResolveError::UnknownDefinition {
                    name: name.to_string(),
                }
                .into()
            }),
    }
}
