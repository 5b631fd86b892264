use crate::domain::product_tag::{NewProductTag, ProductTag};
use crate::domain::tag::{Tag, TagWithProducts};
use crate::forms::tags::{AddTagForm, AssignTagForm};
use crate::repository::errors::RepositoryError;
use crate::repository::{ProductReader, TagReader, TagWriter};
use crate::services::{ServiceError, ServiceResult};

/// Returns every tag ordered by name.
pub fn list_tags<R>(repo: &R) -> ServiceResult<Vec<Tag>>
where
    R: TagReader + ?Sized,
{
    Ok(repo.list_tags()?)
}

/// Fetches a single tag by its identifier.
pub fn get_tag<R>(repo: &R, tag_id: i32) -> ServiceResult<Tag>
where
    R: TagReader + ?Sized,
{
    match repo.get_tag_by_id(tag_id)? {
        Some(tag) => Ok(tag),
        None => Err(ServiceError::NotFound("Tag not found".to_string())),
    }
}

/// Looks a tag up by name and attaches every product carrying it.
pub fn get_tag_with_products<R>(repo: &R, name: &str) -> ServiceResult<TagWithProducts>
where
    R: TagReader + ProductReader + ?Sized,
{
    let tag = match repo.get_tag_by_name(name)? {
        Some(tag) => tag,
        None => return Err(ServiceError::NotFound("Tag not found".to_string())),
    };

    let products = repo.list_products_by_tag(tag.id)?;

    Ok(TagWithProducts::new(tag, products))
}

/// Creates a new tag, rejecting names that are already taken.
pub fn create_tag<R>(repo: &R, form: AddTagForm) -> ServiceResult<Tag>
where
    R: TagReader + TagWriter + ?Sized,
{
    let new_tag = form
        .into_new_tag()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo.get_tag_by_name(&new_tag.name)?.is_some() {
        return Err(ServiceError::Conflict("Tag already exists".to_string()));
    }

    match repo.create_tag(&new_tag) {
        Ok(tag) => Ok(tag),
        Err(RepositoryError::Conflict(_)) => {
            Err(ServiceError::Conflict("Tag already exists".to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

/// Attaches an existing tag to an existing product.
pub fn assign_tag<R>(repo: &R, form: AssignTagForm) -> ServiceResult<ProductTag>
where
    R: ProductReader + TagReader + TagWriter + ?Sized,
{
    let (product_id, tag_id) = form
        .into_ids()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo.get_product_by_id(product_id)?.is_none() {
        return Err(ServiceError::NotFound("Product not found".to_string()));
    }
    if repo.get_tag_by_id(tag_id)?.is_none() {
        return Err(ServiceError::NotFound("Tag not found".to_string()));
    }
    if repo.is_tag_assigned(product_id, tag_id)? {
        return Err(ServiceError::Conflict(
            "Tag already assigned to this product".to_string(),
        ));
    }

    let assignment = NewProductTag::new(product_id, tag_id);

    match repo.assign_tag(&assignment) {
        Ok(product_tag) => Ok(product_tag),
        Err(RepositoryError::Conflict(_)) => Err(ServiceError::Conflict(
            "Tag already assigned to this product".to_string(),
        )),
        Err(err) => Err(err.into()),
    }
}

/// Detaches a tag from a product.
pub fn unassign_tag<R>(repo: &R, product_id: i32, tag_id: i32) -> ServiceResult<()>
where
    R: TagWriter + ?Sized,
{
    match repo.unassign_tag(product_id, tag_id) {
        Ok(()) => Ok(()),
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound(
            "Tag not assigned to this product".to_string(),
        )),
        Err(err) => Err(err.into()),
    }
}
