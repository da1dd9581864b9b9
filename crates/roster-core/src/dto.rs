use crate::rules::validation::{validate, FieldErrors, ValidationResult};
use serde::{Deserialize, Serialize};

pub const MSG_VALIDATION_FAILED: &str = "Validation failed";
pub const MSG_DUPLICATE_EMAIL: &str = "Email já cadastrado.";
pub const MSG_NOT_FOUND: &str = "Cliente não encontrado.";

/// Creation payload. Absent or `null` fields count as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCustomerRequest {
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl CreateCustomerRequest {
    pub fn validate(&self) -> ValidationResult {
        validate(
            self.nome.as_deref().unwrap_or_default(),
            self.email.as_deref().unwrap_or_default(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailedDto {
    pub message: String,
    pub errors: FieldErrors,
}

impl From<FieldErrors> for ValidationFailedDto {
    fn from(errors: FieldErrors) -> Self {
        Self {
            message: MSG_VALIDATION_FAILED.to_string(),
            errors,
        }
    }
}
