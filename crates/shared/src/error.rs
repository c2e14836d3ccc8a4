use thiserror::Error;

/// Field path of the company title in a field-error map.
pub const TITLE_FIELD: &str = "title";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Company title is required.")]
    TitleRequired,
}

impl ValidationError {
    /// Path of the offending field, in the same dotted form the form uses for
    /// contact fields (`contacts.0.name`).
    pub fn field_path(&self) -> &'static str {
        match self {
            ValidationError::TitleRequired => TITLE_FIELD,
        }
    }
}
