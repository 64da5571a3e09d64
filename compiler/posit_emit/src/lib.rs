//! Emission and invocation backends.
//!
//! Both backends implement `posit_dispatch::Backend` and receive the same
//! marshalled argument lists:
//!
//! - [`TextEmitter`] renders each call as source text.
//! - [`ModelBackend`] posts each call onto a live [`Model`], after checking
//!   every variable handle against the model's store.
//!
//! [`render_dispatcher`] renders the dispatch routine a code generator would
//! emit for one definition; [`render_registry`] does so for every definition
//! of a registry.

mod dispatcher;
mod model;
mod text;

pub use dispatcher::{render_dispatcher, render_registry};
pub use model::{Model, ModelBackend, ModelDocument, Posted, VariableDecl};
pub use text::{EmittedCall, TextEmitter};
