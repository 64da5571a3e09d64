//! Diagnostics for constraint reconstruction.
//!
//! - Error codes for searchability (`positc explain E2001`)
//! - Typed error kinds for programmatic matching
//! - Messages that name the definition and the offending slot
//!
//! Every failure is reported synchronously to the caller that requested
//! resolution. Nothing here is retried: matching and marshalling are pure
//! functions of static data, so a second attempt would fail the same way.

mod error_code;
pub mod errors;
mod model_error;
mod registry_error;
mod resolve_error;

pub use error_code::ErrorCode;
pub use errors::ErrorDocs;
pub use model_error::ModelError;
pub use registry_error::{RegistryError, RuleProblem};
pub use resolve_error::{MalformedDetail, ResolveError, ResolveResult, UnresolvedReason};
