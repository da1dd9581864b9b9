use crate::domain::ids::CustomerId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
}

/// A customer that passed validation: name trimmed, email normalized.
///
/// Only [`crate::rules::validate`] builds one, so the store can trust both
/// fields as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    name: String,
    email: String,
}

impl NewCustomer {
    pub(crate) fn new(name: String, email: String) -> Self {
        Self { name, email }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}
