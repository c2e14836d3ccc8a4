use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(CompanyId);
id_newtype!(ContactId);

/// A person attached to exactly one company. `id` stays `None` until the
/// backend has persisted the row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContactId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub last_name: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn blank() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: ContactId) -> Self {
        self.id = Some(id);
        self
    }

    /// Both fields are empty strings. Whitespace counts as content.
    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.last_name.is_empty()
    }

    pub fn full_name(&self) -> String {
        match (self.name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.name, self.last_name),
            (false, true) => self.name.clone(),
            (true, false) => self.last_name.clone(),
            (true, true) => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: CompanyId,
    pub title: String,
    #[serde(default)]
    pub contacts: Vec<Contact>,
}
