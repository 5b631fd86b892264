use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::tag::NewTag;

/// Maximum allowed length for a tag name.
const NAME_MAX_LEN: usize = 255;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Result type returned by the tag form helpers.
pub type TagFormResult<T> = Result<T, TagFormError>;

/// Errors that can occur while processing tag forms.
#[derive(Debug, Error)]
pub enum TagFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The tag name is missing or empty after sanitization.
    #[error("Tag name cannot be null")]
    MissingName,
    /// The assignment body is missing a numeric product or tag identifier.
    #[error("Product ID and Tag ID are required")]
    MissingAssignmentIds,
}

/// JSON body accepted when creating a tag.
#[derive(Debug, Deserialize, Validate)]
pub struct AddTagForm {
    /// Name entered by the user.
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub name: Option<String>,
}

impl AddTagForm {
    /// Validates and sanitizes the payload into a domain `NewTag`.
    pub fn into_new_tag(self) -> TagFormResult<NewTag> {
        self.validate()?;

        let name = self
            .name
            .as_deref()
            .map(sanitize_inline_text)
            .filter(|value| !value.is_empty())
            .ok_or(TagFormError::MissingName)?;

        Ok(NewTag::new(name))
    }
}

/// JSON body accepted when assigning a tag to a product. Identifiers may be
/// sent as numbers or numeric strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTagForm {
    #[serde(default)]
    pub product_id: Option<serde_json::Value>,
    #[serde(default)]
    pub tag_id: Option<serde_json::Value>,
}

impl AssignTagForm {
    /// Coerces both identifiers to numbers, rejecting the request when either
    /// is missing or non-numeric.
    pub fn into_ids(self) -> TagFormResult<(i32, i32)> {
        let product_id =
            coerce_id(self.product_id.as_ref()).ok_or(TagFormError::MissingAssignmentIds)?;
        let tag_id = coerce_id(self.tag_id.as_ref()).ok_or(TagFormError::MissingAssignmentIds)?;

        Ok((product_id, tag_id))
    }
}

fn coerce_id(value: Option<&serde_json::Value>) -> Option<i32> {
    match value? {
        serde_json::Value::Number(num) => num.as_i64().and_then(|id| i32::try_from(id).ok()),
        serde_json::Value::String(raw) => raw.trim().parse::<i32>().ok(),
        _ => None,
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
