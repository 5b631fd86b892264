use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::NewCategory;

/// Maximum length allowed for a category name.
const NAME_MAX_LEN: usize = 255;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Result type returned by the category form helpers.
pub type CategoryFormResult<T> = Result<T, CategoryFormError>;

/// Errors that can occur while processing category forms.
#[derive(Debug, Error)]
pub enum CategoryFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The name is missing or empty after sanitization.
    #[error("Name cannot be null")]
    MissingName,
}

/// JSON body accepted when creating a category.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCategoryForm {
    /// Name entered by the user.
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub name: Option<String>,
}

impl AddCategoryForm {
    /// Validates and sanitizes the payload into a domain `NewCategory`.
    pub fn into_new_category(self) -> CategoryFormResult<NewCategory> {
        self.validate()?;

        let name = self
            .name
            .as_deref()
            .map(sanitize_inline_text)
            .filter(|value| !value.is_empty())
            .ok_or(CategoryFormError::MissingName)?;

        Ok(NewCategory::new(name))
    }
}

/// JSON body accepted when renaming a category. A missing or empty name
/// keeps the stored one.
#[derive(Debug, Deserialize, Validate)]
pub struct EditCategoryForm {
    /// Replacement name submitted by the user.
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub name: Option<String>,
}

impl EditCategoryForm {
    /// Validates the payload and returns the sanitized replacement name, if
    /// one was provided.
    pub fn into_replacement_name(self) -> CategoryFormResult<Option<String>> {
        self.validate()?;

        Ok(self
            .name
            .as_deref()
            .map(sanitize_inline_text)
            .filter(|value| !value.is_empty()))
    }
}

fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}
