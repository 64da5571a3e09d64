//! Posit IR - View catalog and data model.
//!
//! This crate contains the core data structures shared by every stage of
//! constraint reconstruction:
//! - `ViewKind`: the closed catalog of variable representations
//! - `SlotType` / `ActualType`: declared and observed argument signatures
//! - `ArgumentValue`: persisted, tagged argument payloads
//! - `ConcreteArgument`: marshalled values handed to a backend
//! - `TransformRule`, `Variant`, `Definition`: the registry schema
//! - `ConstraintSpec`: one persisted constraint occurrence
//!
//! # Design Philosophy
//!
//! - **Closed catalog**: every representation is a `ViewKind` variant, so the
//!   compatibility predicate is an exhaustive match rather than string lookup.
//! - **Element-wise values**: arrays carry one tagged value per element; an
//!   array is never reinterpreted as a block of raw integers.
//! - **Read-only schema**: variants and definitions expose no mutation API
//!   once constructed.

mod concrete;
mod rule;
mod spec;
mod value;
mod variant;
mod views;

pub use concrete::{ConcreteArgument, VarRef};
pub use rule::{PairComponent, SlotIndex, TransformRule};
pub use spec::ConstraintSpec;
pub use value::{signature_of, ArgumentValue, IntSet, Literal, VarClass, VarId};
pub use variant::{ArgumentSlot, Definition, ParseSlotError, Variant};
pub use views::{ActualType, Shape, Signature, SlotType, ViewKind};
