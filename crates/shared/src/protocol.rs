use serde::{Deserialize, Serialize};

use crate::{
    domain::{Contact, ContactId},
    error::ValidationError,
};

/// Contact entry of a create/update request body. The id is only present for
/// rows the backend already knows about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContactId>,
    pub name: String,
    pub last_name: String,
}

impl ContactPayload {
    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.last_name.is_empty()
    }
}

impl From<&Contact> for ContactPayload {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.name.clone(),
            last_name: contact.last_name.clone(),
        }
    }
}

/// Body of `POST /companies` and `PUT /companies/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyPayload {
    pub title: String,
    pub contacts: Vec<ContactPayload>,
}

impl CompanyPayload {
    pub fn new<'a>(
        title: impl Into<String>,
        contacts: impl IntoIterator<Item = &'a Contact>,
    ) -> Self {
        Self {
            title: title.into(),
            contacts: contacts.into_iter().map(ContactPayload::from).collect(),
        }
    }

    /// Drops contacts whose name and last name are both empty.
    pub fn without_blank_contacts(mut self) -> Self {
        self.contacts.retain(|contact| !contact.is_blank());
        self
    }

    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push(ValidationError::TitleRequired);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
