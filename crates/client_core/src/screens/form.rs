use shared::{
    domain::{Company, Contact, ContactId},
    error::TITLE_FIELD,
    protocol::CompanyPayload,
};

use crate::validation::{contact_field_path, ContactField, FieldErrors};

/// Number of blank contact rows a fresh create form starts with.
pub const SEEDED_CONTACT_ROWS: usize = 2;

/// Edits shared by the create and edit forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEdit {
    SetTitle(String),
    SetContactField {
        index: usize,
        field: ContactField,
        value: String,
    },
    AddContact,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyForm {
    pub title: String,
    pub contacts: Vec<Contact>,
    pub errors: FieldErrors,
}

impl CompanyForm {
    pub fn seeded() -> Self {
        Self {
            title: String::new(),
            contacts: vec![Contact::blank(); SEEDED_CONTACT_ROWS],
            errors: FieldErrors::default(),
        }
    }

    pub fn from_company(company: Company) -> Self {
        Self {
            title: company.title,
            contacts: company.contacts,
            errors: FieldErrors::default(),
        }
    }

    pub fn apply(mut self, edit: FormEdit) -> Self {
        match edit {
            FormEdit::SetTitle(value) => {
                self.errors.clear(TITLE_FIELD);
                self.title = value;
            }
            FormEdit::SetContactField {
                index,
                field,
                value,
            } => {
                self.errors.clear(&contact_field_path(index, field));
                if let Some(contact) = self.contacts.get_mut(index) {
                    match field {
                        ContactField::Name => contact.name = value,
                        ContactField::LastName => contact.last_name = value,
                    }
                }
            }
            FormEdit::AddContact => self.contacts.push(Contact::blank()),
        }
        self
    }

    pub fn remove_contact_at(mut self, index: usize) -> Self {
        if index < self.contacts.len() {
            self.contacts.remove(index);
        }
        self
    }

    pub fn remove_contact_by_id(mut self, id: ContactId) -> Self {
        self.contacts.retain(|contact| contact.id != Some(id));
        self
    }

    pub fn payload(&self) -> CompanyPayload {
        CompanyPayload::new(self.title.clone(), &self.contacts)
    }

    pub fn title_error(&self) -> Option<&str> {
        self.errors.get(TITLE_FIELD)
    }
}
