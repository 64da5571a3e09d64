//! Variant resolution and argument marshalling.
//!
//! Turns a loosely typed constraint occurrence into a fully typed call:
//!
//! ```text
//! ConstraintSpec ──resolve──> (Variant, [ConcreteArgument]) ──Backend::accept──> posted / emitted
//! ```
//!
//! # Modules
//!
//! - `marshal`: per-rule construction of call arguments, element by element
//! - `resolve`: first-match-wins variant selection over a definition
//! - `backend`: the contract every emission or invocation target implements
//! - `compile`: marshalling for calls already bound to one variant
//! - `reconstruct`: ordered replay of many specs against one backend
//!
//! Resolution only reads the registry. A call reaches a backend only after
//! every argument has been marshalled, so a failure never leaves a
//! half-posted constraint behind.

mod backend;
mod compile;
mod marshal;
mod reconstruct;
mod resolve;

pub use backend::{Backend, RecordingBackend};
pub use compile::{compile_bound, post_bound};
pub use marshal::Marshaller;
pub use reconstruct::{
    FailurePolicy, ReconstructConfig, ReconstructFailure, ReconstructReport, Reconstructor,
    SkippedConstraint,
};
pub use resolve::{resolve, resolve_by_name, select_variant, ResolvedCall};
