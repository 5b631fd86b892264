use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, NewCategory, UpdateCategory};
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};
use crate::domain::product_tag::{NewProductTag, ProductTag};
use crate::domain::tag::{NewTag, Tag};

pub mod category;
pub mod errors;
pub mod favorite;
pub mod product;
pub mod tag;

#[cfg(test)]
pub mod mock;

use errors::RepositoryResult;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over product records.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    fn list_products_by_tag(&self, tag_id: i32) -> RepositoryResult<Vec<Product>>;
}

/// Write operations over product records.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(&self, product_id: i32, updates: &UpdateProduct)
    -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: i32) -> RepositoryResult<Product>;
    fn delete_products(&self, product_ids: &[i32]) -> RepositoryResult<Vec<Product>>;
}

/// Read-only operations over category records.
pub trait CategoryReader {
    fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
}

/// Write operations over category records.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    fn update_category(
        &self,
        category_id: i32,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Category>;
    fn delete_category(&self, category_id: i32) -> RepositoryResult<Category>;
}

/// Read-only operations over tag records and tag assignments.
pub trait TagReader {
    fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<Tag>>;
    fn get_tag_by_name(&self, name: &str) -> RepositoryResult<Option<Tag>>;
    fn get_tags_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Tag>>;
    fn list_tags(&self) -> RepositoryResult<Vec<Tag>>;
    fn is_tag_assigned(&self, product_id: i32, tag_id: i32) -> RepositoryResult<bool>;
}

/// Write operations over tag records and tag assignments.
pub trait TagWriter {
    fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<Tag>;
    fn assign_tag(&self, assignment: &NewProductTag) -> RepositoryResult<ProductTag>;
    fn unassign_tag(&self, product_id: i32, tag_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over the favorites list.
pub trait FavoriteReader {
    fn list_favorite_products(&self) -> RepositoryResult<Vec<Product>>;
    fn is_favorite(&self, product_id: i32) -> RepositoryResult<bool>;
}

/// Write operations over the favorites list.
pub trait FavoriteWriter {
    fn add_favorite(&self, product_id: i32) -> RepositoryResult<()>;
    fn remove_favorite(&self, product_id: i32) -> RepositoryResult<()>;
}
