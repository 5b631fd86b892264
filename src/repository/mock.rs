use mockall::mock;

use super::{
    CategoryReader, CategoryWriter, FavoriteReader, FavoriteWriter, ProductReader, ProductWriter,
    TagReader, TagWriter,
};
use crate::domain::{
    category::{Category, NewCategory, UpdateCategory},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
    product_tag::{NewProductTag, ProductTag},
    tag::{NewTag, Tag},
};
use crate::repository::errors::RepositoryResult;

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
        fn list_products_by_tag(&self, tag_id: i32) -> RepositoryResult<Vec<Product>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<Product>;
        fn delete_products(&self, product_ids: &[i32]) -> RepositoryResult<Vec<Product>>;
    }
}

mock! {
    pub CategoryReader {}

    impl CategoryReader for CategoryReader {
        fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
        fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    }
}

mock! {
    pub CategoryWriter {}

    impl CategoryWriter for CategoryWriter {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
        fn update_category(&self, category_id: i32, updates: &UpdateCategory) -> RepositoryResult<Category>;
        fn delete_category(&self, category_id: i32) -> RepositoryResult<Category>;
    }
}

mock! {
    pub TagReader {}

    impl TagReader for TagReader {
        fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<Tag>>;
        fn get_tag_by_name(&self, name: &str) -> RepositoryResult<Option<Tag>>;
        fn get_tags_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Tag>>;
        fn list_tags(&self) -> RepositoryResult<Vec<Tag>>;
        fn is_tag_assigned(&self, product_id: i32, tag_id: i32) -> RepositoryResult<bool>;
    }
}

mock! {
    pub TagWriter {}

    impl TagWriter for TagWriter {
        fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<Tag>;
        fn assign_tag(&self, assignment: &NewProductTag) -> RepositoryResult<ProductTag>;
        fn unassign_tag(&self, product_id: i32, tag_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub FavoriteReader {}

    impl FavoriteReader for FavoriteReader {
        fn list_favorite_products(&self) -> RepositoryResult<Vec<Product>>;
        fn is_favorite(&self, product_id: i32) -> RepositoryResult<bool>;
    }
}

mock! {
    pub FavoriteWriter {}

    impl FavoriteWriter for FavoriteWriter {
        fn add_favorite(&self, product_id: i32) -> RepositoryResult<()>;
        fn remove_favorite(&self, product_id: i32) -> RepositoryResult<()>;
    }
}
