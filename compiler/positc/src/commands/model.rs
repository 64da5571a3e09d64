//! The `load` and `gen` commands: replay a persisted model.

use std::fmt::Write;

use posit_dispatch::{ReconstructReport, Reconstructor};
use posit_emit::{ModelDocument, TextEmitter};

use super::{read_file, CliError, CommandOptions};

fn read_model(path: &str) -> Result<ModelDocument, CliError> {
    let text = read_file(path)?;
    Ok(ModelDocument::from_json(&text, path)?)
}

fn write_skipped(out: &mut String, report: &ReconstructReport, prefix: &str) {
    for skipped in &report.skipped {
        let _ = writeln!(
            out,
            "{prefix}skipped constraint {} (`{}`): [{}] {}",
            skipped.position,
            skipped.name,
            skipped.error.code(),
            skipped.error
        );
    }
}

/// Rebuild a model and list the calls posted onto it.
pub fn load_model(path: &str, options: &CommandOptions) -> Result<String, CliError> {
    let document = read_model(path)?;
    let registry = options.registry.load()?;
    let mut model = document.model()?;

    let report = Reconstructor::new(&registry, options.reconstruct_config())
        .run(&document.constraints, &mut model.backend())?;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "posted {} constraint(s) over {} variable(s)",
        report.posted,
        model.var_count()
    );
    for posted in model.posted() {
        let _ = writeln!(out, "  {posted}");
    }
    write_skipped(&mut out, &report, "");
    Ok(out)
}

/// Emit posting source for a model, naming variables as the document does.
pub fn gen_model(path: &str, options: &CommandOptions) -> Result<String, CliError> {
    let document = read_model(path)?;
    let registry = options.registry.load()?;
    let mut emitter = TextEmitter::with_names(document.model()?.names());

    let report = Reconstructor::new(&registry, options.reconstruct_config())
        .run(&document.constraints, &mut emitter)?;

    let mut out = emitter.into_source();
    write_skipped(&mut out, &report, "// ");
    Ok(out)
}
