use crate::domain::customer::NewCustomer;
use crate::domain::email::{is_valid_email, normalize_email};
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const FIELD_NAME: &str = "nome";
pub const FIELD_EMAIL: &str = "email";

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_EMAIL_LEN: usize = 200;

const MSG_NAME_REQUIRED: &str = "Nome é obrigatório.";
const MSG_NAME_TOO_LONG: &str = "Nome deve ter no máximo 200 caracteres.";
const MSG_EMAIL_REQUIRED: &str = "Email é obrigatório.";
const MSG_EMAIL_TOO_LONG: &str = "Email deve ter no máximo 200 caracteres.";
const MSG_EMAIL_INVALID: &str = "Email inválido.";

/// Field name to ordered messages for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in self.iter() {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                first = false;
                write!(f, "{field}: {message}")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid(NewCustomer),
    Invalid(FieldErrors),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    pub fn into_result(self) -> Result<NewCustomer, CoreError> {
        match self {
            ValidationResult::Valid(customer) => Ok(customer),
            ValidationResult::Invalid(errors) => Err(CoreError::Validation(errors)),
        }
    }
}

/// Checks a creation request. Every field is checked, so one call reports
/// all problems; each field yields at most one message.
pub fn validate(raw_name: &str, raw_email: &str) -> ValidationResult {
    let mut errors = FieldErrors::new();

    let name = raw_name.trim();
    if name.is_empty() {
        errors.push(FIELD_NAME, MSG_NAME_REQUIRED);
    } else if name.chars().count() > MAX_NAME_LEN {
        errors.push(FIELD_NAME, MSG_NAME_TOO_LONG);
    }

    let email = raw_email.trim();
    if email.is_empty() {
        errors.push(FIELD_EMAIL, MSG_EMAIL_REQUIRED);
    } else if email.chars().count() > MAX_EMAIL_LEN {
        errors.push(FIELD_EMAIL, MSG_EMAIL_TOO_LONG);
    } else if !is_valid_email(email) {
        errors.push(FIELD_EMAIL, MSG_EMAIL_INVALID);
    }

    match normalize_email(email) {
        Some(email) if errors.is_empty() => {
            ValidationResult::Valid(NewCustomer::new(name.to_string(), email))
        }
        _ => ValidationResult::Invalid(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::{validate, ValidationResult, FIELD_EMAIL, FIELD_NAME};

    fn invalid(result: ValidationResult) -> super::FieldErrors {
        match result {
            ValidationResult::Invalid(errors) => errors,
            ValidationResult::Valid(customer) => panic!("expected invalid, got {customer:?}"),
        }
    }

    #[test]
    fn valid_input_is_trimmed_and_normalized() {
        let result = validate("  Carlos Silva ", " Carlos@EMAIL.com ");
        let customer = result.into_result().expect("valid");
        assert_eq!(customer.name(), "Carlos Silva");
        assert_eq!(customer.email(), "carlos@email.com");
    }

    #[test]
    fn blank_name_is_required() {
        for name in ["", "   ", "\t\n"] {
            let errors = invalid(validate(name, "carlos@email.com"));
            assert_eq!(errors.get(FIELD_NAME), Some(&["Nome é obrigatório.".to_string()][..]));
            assert!(!errors.contains(FIELD_EMAIL));
        }
    }

    #[test]
    fn empty_email_reports_required_only() {
        let errors = invalid(validate("Carlos", "  "));
        assert_eq!(
            errors.get(FIELD_EMAIL),
            Some(&["Email é obrigatório.".to_string()][..])
        );
    }

    #[test]
    fn malformed_email_reports_invalid_only() {
        let errors = invalid(validate("Carlos", "invalido"));
        assert_eq!(errors.get(FIELD_EMAIL), Some(&["Email inválido.".to_string()][..]));
        assert!(!errors.contains(FIELD_NAME));
    }

    #[test]
    fn email_grammar_checks_input_before_lowercasing() {
        // KELVIN SIGN lowercases to ASCII 'k'.
        let errors = invalid(validate("Carlos", "\u{212A}arlos@email.com"));
        assert_eq!(errors.get(FIELD_EMAIL), Some(&["Email inválido.".to_string()][..]));
    }

    #[test]
    fn errors_accumulate_across_fields() {
        let errors = invalid(validate("", ""));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(FIELD_NAME).map(<[String]>::len), Some(1));
        assert_eq!(errors.get(FIELD_EMAIL).map(<[String]>::len), Some(1));
    }

    #[test]
    fn overlong_fields_are_rejected() {
        let name = "a".repeat(201);
        let email = format!("{}@email.com", "b".repeat(60)).repeat(4);
        let errors = invalid(validate(&name, &email));
        assert_eq!(
            errors.get(FIELD_NAME),
            Some(&["Nome deve ter no máximo 200 caracteres.".to_string()][..])
        );
        assert_eq!(
            errors.get(FIELD_EMAIL),
            Some(&["Email deve ter no máximo 200 caracteres.".to_string()][..])
        );
    }

    #[test]
    fn name_length_counts_characters() {
        let name = "ç".repeat(200);
        assert!(validate(&name, "carlos@email.com").is_valid());
    }

    #[test]
    fn field_errors_serialize_as_map() {
        let errors = invalid(validate("", "invalido"));
        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"email": ["Email inválido."], "nome": ["Nome é obrigatório."]})
        );
    }
}
