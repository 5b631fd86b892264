use serde::Deserialize;
use thiserror::Error;

/// Result type returned by the favorite form helpers.
pub type FavoriteFormResult<T> = Result<T, FavoriteFormError>;

/// Errors that can occur while processing favorite forms.
#[derive(Debug, Error)]
pub enum FavoriteFormError {
    /// The body is missing a numeric product identifier.
    #[error("Invalid ID")]
    InvalidProductId,
}

/// JSON body accepted when adding a product to the favorites list. The
/// identifier may be sent as a number or a numeric string.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteForm {
    #[serde(default)]
    pub product_id: Option<serde_json::Value>,
}

impl AddFavoriteForm {
    /// Coerces the identifier to a number, rejecting the request when it is
    /// missing or non-numeric.
    pub fn into_product_id(self) -> FavoriteFormResult<i32> {
        match self.product_id {
            Some(serde_json::Value::Number(num)) => num
                .as_i64()
                .and_then(|id| i32::try_from(id).ok())
                .ok_or(FavoriteFormError::InvalidProductId),
            Some(serde_json::Value::String(raw)) => raw
                .trim()
                .parse::<i32>()
                .map_err(|_| FavoriteFormError::InvalidProductId),
            _ => Err(FavoriteFormError::InvalidProductId),
        }
    }
}
