use crate::domain::product::Product;
use crate::forms::favorites::AddFavoriteForm;
use crate::repository::errors::RepositoryError;
use crate::repository::{FavoriteReader, FavoriteWriter, ProductReader};
use crate::services::{ServiceError, ServiceResult};

/// Returns every favorited product, most recently favorited first.
pub fn list_favorites<R>(repo: &R) -> ServiceResult<Vec<Product>>
where
    R: FavoriteReader + ?Sized,
{
    Ok(repo.list_favorite_products()?)
}

/// Reports whether a product is currently favorited.
pub fn is_favorite<R>(repo: &R, product_id: i32) -> ServiceResult<bool>
where
    R: FavoriteReader + ?Sized,
{
    Ok(repo.is_favorite(product_id)?)
}

/// Marks a product as favorite and returns it.
pub fn add_favorite<R>(repo: &R, form: AddFavoriteForm) -> ServiceResult<Product>
where
    R: FavoriteReader + FavoriteWriter + ProductReader + ?Sized,
{
    let product_id = form
        .into_product_id()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let product = match repo.get_product_by_id(product_id)? {
        Some(product) => product,
        None => return Err(ServiceError::NotFound("Product not found".to_string())),
    };

    if repo.is_favorite(product_id)? {
        return Err(ServiceError::Conflict(
            "Product already in favorites".to_string(),
        ));
    }

    match repo.add_favorite(product_id) {
        Ok(()) => Ok(product),
        Err(RepositoryError::Conflict(_)) => Err(ServiceError::Conflict(
            "Product already in favorites".to_string(),
        )),
        Err(err) => Err(err.into()),
    }
}

/// Removes a product from the favorites list.
pub fn remove_favorite<R>(repo: &R, product_id: i32) -> ServiceResult<()>
where
    R: FavoriteWriter + ?Sized,
{
    match repo.remove_favorite(product_id) {
        Ok(()) => Ok(()),
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound(
            "Product not in favorites".to_string(),
        )),
        Err(err) => Err(err.into()),
    }
}
