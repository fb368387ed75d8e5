use std::fmt;

use backend::BackendError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Store failures pass through untouched.
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Form(#[from] FormError),
}

/// Input rejected before anything is sent to the store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: &'static str, value: String },
    #[error("{0} cannot be changed while editing")]
    ReadOnly(&'static str),
    #[error("unknown field {0:?}")]
    UnknownField(String),
}

/// A mutation failure shown to the administrator, e.g. "Error saving product: ...".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAlert {
    pub message: String,
}

impl AdminAlert {
    pub fn new(context: &str, cause: &dyn fmt::Display) -> Self {
        Self { message: format!("{context}: {cause}") }
    }
}

impl fmt::Display for AdminAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AdminAlert {}
