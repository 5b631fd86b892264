use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::favorite::Favorite as DomainFavorite;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::favorites)]
pub struct Favorite {
    pub id: i32,
    pub product_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::favorites)]
pub struct NewFavorite {
    pub product_id: i32,
}

impl From<Favorite> for DomainFavorite {
    fn from(value: Favorite) -> Self {
        Self {
            id: value.id,
            product_id: value.product_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
