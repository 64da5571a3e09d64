//! Posit command-line driver.
//!
//! Command handlers return their report as a `String` so the binary stays a
//! thin argument matcher and the handlers can be tested in-process.

pub mod commands;
mod tracing_setup;

pub use tracing_setup::init_tracing;
