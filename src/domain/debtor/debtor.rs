//! Debtor entity and its registration input.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DebtorId, ValidationError};

/// Legal classification of a debtor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtorKind {
    Individual,
    Company,
}

impl DebtorKind {
    /// Returns the storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtorKind::Individual => "individual",
            DebtorKind::Company => "company",
        }
    }

    /// Parses the storage representation.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_lowercase().as_str() {
            "individual" => Ok(DebtorKind::Individual),
            "company" => Ok(DebtorKind::Company),
            other => Err(ValidationError::invalid_format(
                "typeOfDebtor",
                format!("expected 'individual' or 'company', got '{}'", other),
            )),
        }
    }
}

impl fmt::Display for DebtorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Postal address of a debtor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub postal_code: String,
    pub city: String,
    /// Federative unit (state).
    pub uf: String,
    pub street: String,
    pub number: String,
    #[serde(default)]
    pub complement: String,
}

/// Input for registering a debtor with the debtor store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDebtor {
    pub fiscal_document: String,
    pub name: String,
    pub email: String,
    pub type_of_debtor: DebtorKind,
    #[serde(default)]
    pub address: Address,
}

/// A person or company a debt is owed by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debtor {
    pub id: DebtorId,
    pub fiscal_document: String,
    pub name: String,
    pub email: String,
    pub type_of_debtor: DebtorKind,
    pub address: Address,
}

impl Debtor {
    /// Validates registration input and assigns the given id.
    ///
    /// # Errors
    ///
    /// - `EmptyField` when fiscal document or name is blank
    /// - `InvalidFormat` when the email has no `@`
    pub fn register(id: DebtorId, input: NewDebtor) -> Result<Self, ValidationError> {
        let fiscal_document = input.fiscal_document.trim().to_string();
        if fiscal_document.is_empty() {
            return Err(ValidationError::empty_field("fiscalDocument"));
        }

        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }

        let email = input.email.trim().to_string();
        if !email.contains('@') {
            return Err(ValidationError::invalid_format("email", "missing @ symbol"));
        }

        Ok(Self {
            id,
            fiscal_document,
            name,
            email,
            type_of_debtor: input.type_of_debtor,
            address: input.address,
        })
    }
}
