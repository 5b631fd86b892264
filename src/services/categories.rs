use crate::domain::category::{Category, UpdateCategory};
use crate::forms::categories::{AddCategoryForm, EditCategoryForm};
use crate::repository::errors::RepositoryError;
use crate::repository::{CategoryReader, CategoryWriter};
use crate::services::{ServiceError, ServiceResult};

/// Returns every category ordered by name.
pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader + ?Sized,
{
    Ok(repo.list_categories()?)
}

/// Fetches a single category by its identifier.
pub fn get_category<R>(repo: &R, category_id: i32) -> ServiceResult<Category>
where
    R: CategoryReader + ?Sized,
{
    match repo.get_category_by_id(category_id)? {
        Some(category) => Ok(category),
        None => Err(ServiceError::NotFound("Category not found".to_string())),
    }
}

/// Creates a new category.
pub fn create_category<R>(repo: &R, form: AddCategoryForm) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    let new_category = form
        .into_new_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    match repo.create_category(&new_category) {
        Ok(category) => Ok(category),
        Err(RepositoryError::Conflict(_)) => Err(ServiceError::Conflict(
            "Category already exists".to_string(),
        )),
        Err(err) => Err(err.into()),
    }
}

/// Renames an existing category. A missing name keeps the stored one, only
/// bumping the update timestamp.
pub fn update_category<R>(
    repo: &R,
    category_id: i32,
    form: EditCategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    let replacement = form
        .into_replacement_name()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let existing = match repo.get_category_by_id(category_id)? {
        Some(category) => category,
        None => return Err(ServiceError::NotFound("Category not found".to_string())),
    };

    let name = replacement.unwrap_or(existing.name);
    let updates = UpdateCategory::new(name);

    match repo.update_category(category_id, &updates) {
        Ok(category) => Ok(category),
        Err(RepositoryError::NotFound) => {
            Err(ServiceError::NotFound("Category not found".to_string()))
        }
        Err(RepositoryError::Conflict(_)) => Err(ServiceError::Conflict(
            "Category already exists".to_string(),
        )),
        Err(err) => Err(err.into()),
    }
}

/// Deletes a category; refused while any product still references it.
pub fn delete_category<R>(repo: &R, category_id: i32) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    match repo.delete_category(category_id) {
        Ok(category) => Ok(category),
        Err(RepositoryError::NotFound) => {
            Err(ServiceError::NotFound("Category not found".to_string()))
        }
        Err(RepositoryError::Conflict(_)) => Err(ServiceError::Conflict(
            "Cannot delete category with associated products".to_string(),
        )),
        Err(err) => Err(err.into()),
    }
}
