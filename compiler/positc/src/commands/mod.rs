//! Command handlers for the Posit CLI.
//!
//! Each submodule implements one command. Shared option parsing, registry
//! loading, and file reading live here in the module root.

use std::path::PathBuf;

use posit_diagnostic::{ErrorCode, ModelError, RegistryError, ResolveError};
use posit_dispatch::{FailurePolicy, ReconstructConfig, ReconstructFailure};
use posit_registry::Registry;

mod check;
mod dispatch;
mod explain;
mod model;

pub use check::{check_registry, dump_registry};
pub use dispatch::render_dispatch;
pub use explain::explain_error;
pub use model::{gen_model, load_model};

/// Failure of a CLI command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("[{}] {0}", .0.code())]
    Registry(#[from] RegistryError),

    #[error("[{}] {0}", .0.code())]
    Model(#[from] ModelError),

    #[error("[{}] {0}", .0.code())]
    Resolve(#[from] ResolveError),

    #[error("[{}] {0}", .0.source.code())]
    Reconstruct(#[from] ReconstructFailure),

    #[error("unknown error code: {0}")]
    UnknownCode(String),

    #[error("no documentation available for {0}")]
    Undocumented(ErrorCode),

    #[error("{0}")]
    Usage(String),
}

impl CliError {
    /// Diagnostic code behind the failure, if it has one.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            CliError::Registry(err) => Some(err.code()),
            CliError::Model(err) => Some(err.code()),
            CliError::Resolve(err) => Some(err.code()),
            CliError::Reconstruct(failure) => Some(failure.source.code()),
            CliError::Io { .. }
            | CliError::UnknownCode(_)
            | CliError::Undocumented(_)
            | CliError::Usage(_) => None,
        }
    }
}

/// Where a command takes its definition registry from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RegistrySource {
    #[default]
    Builtin,
    File(PathBuf),
}

impl RegistrySource {
    pub fn load(&self) -> Result<Registry, CliError> {
        match self {
            RegistrySource::Builtin => Ok(posit_registry::builtin()?),
            RegistrySource::File(path) => {
                let text = read_file(path)?;
                Ok(Registry::from_json(&text, &path.display().to_string())?)
            }
        }
    }
}

/// Flags shared by every command, plus the positional arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandOptions {
    pub registry: RegistrySource,
    /// Whether `--registry` or `--builtin` was given explicitly.
    pub registry_given: bool,
    pub parallel: bool,
    pub skip_failures: bool,
    pub positional: Vec<String>,
}

impl Default for CommandOptions {
    fn default() -> Self {
        CommandOptions {
            registry: RegistrySource::Builtin,
            registry_given: false,
            parallel: true,
            skip_failures: false,
            positional: Vec::new(),
        }
    }
}

impl CommandOptions {
    /// Registry to use when a bare path names it, as in `positc check table.json`.
    pub fn registry_or_positional(&self) -> RegistrySource {
        match self.positional.first() {
            Some(path) if !self.registry_given => RegistrySource::File(PathBuf::from(path)),
            _ => self.registry.clone(),
        }
    }

    pub fn reconstruct_config(&self) -> ReconstructConfig {
        ReconstructConfig {
            parallel: self.parallel,
            on_failure: if self.skip_failures {
                FailurePolicy::Skip
            } else {
                FailurePolicy::Abort
            },
        }
    }
}

/// Parse command flags. Anything that is not a flag is positional.
pub fn parse_options(args: &[String]) -> Result<CommandOptions, CliError> {
    let mut options = CommandOptions::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--registry" => {
                let Some(path) = args.get(i + 1) else {
                    return Err(CliError::Usage("--registry needs a file".to_string()));
                };
                options.registry = RegistrySource::File(PathBuf::from(path));
                options.registry_given = true;
                i += 1;
            }
            "--builtin" => {
                options.registry = RegistrySource::Builtin;
                options.registry_given = true;
            }
            "--skip-failures" => options.skip_failures = true,
            "--no-parallel" => options.parallel = false,
            flag if flag.starts_with("--") => {
                return Err(CliError::Usage(format!("unknown option: {flag}")));
            }
            positional => options.positional.push(positional.to_string()),
        }
        i += 1;
    }
    Ok(options)
}

pub(crate) fn read_file(path: impl AsRef<std::path::Path>) -> Result<String, CliError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })
}
