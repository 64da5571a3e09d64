//! Definition registry.
//!
//! The registry is the static table that maps a definition name to its
//! ordered variants. It is assembled once, either through
//! [`RegistryBuilder`] or from a JSON document, validated as a whole, and
//! then only read. Resolution borrows it; nothing in the engine mutates it.
//!
//! # Validation
//!
//! `RegistryBuilder::build` rejects a table that could never marshal
//! correctly:
//! - duplicate definition names
//! - rules that read undeclared slots
//! - variants whose rule count disagrees with the target operation's arity
//! - projections of non-pair slots, concatenations of single values or of
//!   differently shaped arrays, negation of set elements

mod builder;
mod builtin;
mod document;
mod registry;
mod validate;

pub use builder::RegistryBuilder;
pub use builtin::builtin;
pub use registry::{Operation, Registry};

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Tests use expect for brevity")]
mod tests;
