//! Error types for component operations.

use pf_core::error::PfError;
use thiserror::Error;

/// Errors that can occur during component construction and evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    /// A configured parameter violates its allowed range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(PfError),

    /// Inputs are well-formed but the physics is undefined for them.
    #[error("Non-physical value: {what}")]
    NonPhysical { what: String },

    /// A value the evaluation needs was not supplied.
    #[error("Missing input: {what}")]
    MissingInput { what: &'static str },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl ComponentError {
    pub fn non_physical(what: impl Into<String>) -> Self {
        ComponentError::NonPhysical { what: what.into() }
    }
}

impl From<PfError> for ComponentError {
    fn from(e: PfError) -> Self {
        ComponentError::InvalidParameter(e)
    }
}
