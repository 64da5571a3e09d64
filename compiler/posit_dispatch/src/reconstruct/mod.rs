//! Ordered reconstruction of many constraints.
//!
//! Resolution only reads the registry, so every spec can be resolved ahead
//! of time (in parallel when configured). Invocation is strictly
//! sequential in declaration order, so the backend observes exactly the
//! same sequence of calls either way.

use posit_diagnostic::{ResolveError, ResolveResult};
use posit_ir::ConstraintSpec;
use posit_registry::Registry;
use rayon::prelude::*;

use crate::{resolve_by_name, Backend, ResolvedCall};

/// What to do when one constraint fails to resolve or post.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the failing constraint. Constraints before it stay posted.
    #[default]
    Abort,
    /// Record the failure and continue with the next constraint.
    Skip,
}

/// Reconstruction settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ReconstructConfig {
    /// Resolve all specs on the rayon pool before invoking any.
    pub parallel: bool,
    pub on_failure: FailurePolicy,
}

impl Default for ReconstructConfig {
    fn default() -> Self {
        ReconstructConfig {
            parallel: true,
            on_failure: FailurePolicy::Abort,
        }
    }
}

/// A constraint that was not posted under [`FailurePolicy::Skip`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedConstraint {
    /// Position of the spec in the input.
    pub position: usize,
    pub name: String,
    pub error: ResolveError,
}

/// Outcome of a completed reconstruction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconstructReport {
    pub posted: usize,
    pub skipped: Vec<SkippedConstraint>,
}

/// Reconstruction stopped at a failing constraint under
/// [`FailurePolicy::Abort`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("constraint {position} (`{name}`): {source}")]
pub struct ReconstructFailure {
    pub position: usize,
    pub name: String,
    /// Constraints posted before the failure.
    pub posted: usize,
    pub source: ResolveError,
}

/// Replays constraint specs against one backend.
pub struct Reconstructor<'r> {
    registry: &'r Registry,
    config: ReconstructConfig,
}

impl<'r> Reconstructor<'r> {
    pub fn new(registry: &'r Registry, config: ReconstructConfig) -> Self {
        Reconstructor { registry, config }
    }

    pub fn config(&self) -> ReconstructConfig {
        self.config
    }

    /// Resolve every spec without invoking anything, preserving input order.
    pub fn resolve_all(&self, specs: &[ConstraintSpec]) -> Vec<ResolveResult<ResolvedCall<'r>>> {
        let registry = self.registry;
        if self.config.parallel {
            specs
                .par_iter()
                .map(|spec| resolve_by_name(registry, spec))
                .collect()
        } else {
            specs
                .iter()
                .map(|spec| resolve_by_name(registry, spec))
                .collect()
        }
    }

    /// Resolve and post every spec, in declaration order.
    #[tracing::instrument(level = "debug", skip_all, fields(specs = specs.len()))]
    pub fn run(
        &self,
        specs: &[ConstraintSpec],
        backend: &mut impl Backend,
    ) -> Result<ReconstructReport, ReconstructFailure> {
        let resolved = self.resolve_all(specs);
        let mut report = ReconstructReport::default();

        for (position, (spec, call)) in specs.iter().zip(resolved).enumerate() {
            let outcome = call.and_then(|call| call.post(&mut *backend));
            match outcome {
                Ok(()) => report.posted += 1,
                Err(error) => match self.config.on_failure {
                    FailurePolicy::Abort => {
                        return Err(ReconstructFailure {
                            position,
                            name: spec.name.clone(),
                            posted: report.posted,
                            source: error,
                        });
                    }
                    FailurePolicy::Skip => {
                        tracing::warn!(
                            position,
                            name = %spec.name,
                            code = %error.code(),
                            "skipping constraint: {error}"
                        );
                        report.skipped.push(SkippedConstraint {
                            position,
                            name: spec.name.clone(),
                            error,
                        });
                    }
                },
            }
        }

        tracing::debug!(
            posted = report.posted,
            skipped = report.skipped.len(),
            "reconstruction finished"
        );
        Ok(report)
    }
}
