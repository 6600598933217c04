//! Field validation for the add-shop form
//!
//! Every field is checked independently so the form can show all
//! problems at once.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::ShopForm;

/// Form fields that carry validation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Address,
}

impl Field {
    pub const ALL: [Field; 2] = [Field::Name, Field::Address];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Address => "address",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Address => "Address",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A problem with a single field, shown inline next to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn required(field: Field) -> Self {
        Self {
            field,
            message: format!("{} is required", field.label()),
        }
    }
}

/// All field problems of one submission, in form order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
        self.errors.sort_by_key(|e| e.field);
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn from_validation(errors: &ValidationErrors) -> Self {
        let failed = errors.errors();
        let mut out = Self::default();
        for field in Field::ALL {
            if failed.contains_key(field.as_str()) {
                out.push(FieldError::required(field));
            }
        }
        out
    }
}

impl From<FieldErrors> for Vec<FieldError> {
    fn from(errors: FieldErrors) -> Self {
        errors.errors
    }
}

/// Fails when the value is empty after trimming whitespace
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Check the required fields of a form
pub fn validate_shop_form(form: &ShopForm) -> Result<(), FieldErrors> {
    form.validate()
        .map_err(|errors| FieldErrors::from_validation(&errors))
}
