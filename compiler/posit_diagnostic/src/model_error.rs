//! Errors raised while loading or growing a live model.

use crate::ErrorCode;

/// A model that cannot be built or extended.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("cannot load model {origin}: {message}")]
    Document { origin: String, message: String },

    /// Variable indices are `u32`; the store already holds `limit` variables.
    #[error("variable store is full ({limit} variables)")]
    StoreFull { limit: usize },
}

impl ModelError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ModelError::Document { .. } => ErrorCode::E3002,
            ModelError::StoreFull { .. } => ErrorCode::E3003,
        }
    }
}
