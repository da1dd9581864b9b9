use crate::rules::validation::FieldErrors;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("invalid customer id: {0}")]
    InvalidCustomerId(String),
}
