use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation of a favorite mark on a product. A product can be
/// favorited at most once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    /// Unique identifier of the favorite record.
    pub id: i32,
    /// Identifier of the favorited product.
    pub product_id: i32,
    /// Timestamp for when the product was favorited.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the favorite record.
    pub updated_at: NaiveDateTime,
}
