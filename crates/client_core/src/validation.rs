//! Field-scoped validation messages keyed by dotted field path.

use std::collections::BTreeMap;

use shared::{error::ValidationError, protocol::CompanyPayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    LastName,
}

impl ContactField {
    fn wire_name(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::LastName => "lastName",
        }
    }
}

pub fn contact_field_path(index: usize, field: ContactField) -> String {
    format!("contacts.{index}.{}", field.wire_name())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    messages: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn from_validation(errors: &[ValidationError]) -> Self {
        let mut out = Self::default();
        for err in errors {
            out.insert(err.field_path(), err.to_string());
        }
        out
    }

    pub fn insert(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(path.into(), message.into());
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.messages.get(path).map(String::as_str)
    }

    /// Called whenever the user edits the field at `path`.
    pub fn clear(&mut self, path: &str) {
        self.messages.remove(path);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.messages
            .iter()
            .map(|(path, message)| (path.as_str(), message.as_str()))
    }
}

pub fn validate_company(payload: &CompanyPayload) -> Result<(), FieldErrors> {
    payload
        .validate()
        .map_err(|errors| FieldErrors::from_validation(&errors))
}
