use diesel::dsl::{exists, select};
use diesel::prelude::*;

use crate::domain::product::Product as DomainProduct;
use crate::models::favorite::NewFavorite as DbNewFavorite;
use crate::models::product::Product as DbProduct;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::product::attach_product_relations;
use crate::repository::{DieselRepository, FavoriteReader, FavoriteWriter};

impl FavoriteReader for DieselRepository {
    fn list_favorite_products(&self) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::{favorites, products};

        let mut conn = self.conn()?;

        let db_products = favorites::table
            .inner_join(products::table)
            .order(favorites::created_at.desc())
            .select(products::all_columns)
            .load::<DbProduct>(&mut conn)?;

        attach_product_relations(&mut conn, db_products)
    }

    fn is_favorite(&self, product_id: i32) -> RepositoryResult<bool> {
        use crate::schema::favorites;

        let mut conn = self.conn()?;

        let favorite = select(exists(
            favorites::table.filter(favorites::product_id.eq(product_id)),
        ))
        .get_result(&mut conn)?;

        Ok(favorite)
    }
}

impl FavoriteWriter for DieselRepository {
    fn add_favorite(&self, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::favorites;

        let mut conn = self.conn()?;

        let insertable = DbNewFavorite { product_id };

        diesel::insert_into(favorites::table)
            .values(&insertable)
            .execute(&mut conn)?;

        Ok(())
    }

    fn remove_favorite(&self, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::favorites;

        let mut conn = self.conn()?;

        let deleted =
            diesel::delete(favorites::table.filter(favorites::product_id.eq(product_id)))
                .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
