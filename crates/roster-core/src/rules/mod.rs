pub mod validation;

pub use validation::{
    validate, FieldErrors, ValidationResult, FIELD_EMAIL, FIELD_NAME, MAX_EMAIL_LEN, MAX_NAME_LEN,
};
