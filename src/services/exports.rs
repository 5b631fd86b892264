use crate::domain::product::{ProductListQuery, ProductSortBy, SortOrder};
use crate::repository::ProductReader;
use crate::services::{ServiceError, ServiceResult};

/// Timestamp layout used in exported rows, matching JavaScript's
/// `Date.toISOString()`.
const EXPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Renders the whole catalog as CSV, oldest products first.
pub fn export_products_csv<R>(repo: &R) -> ServiceResult<Vec<u8>>
where
    R: ProductReader + ?Sized,
{
    let query = ProductListQuery::new().sort(ProductSortBy::CreatedAt, SortOrder::Asc);
    let (_, products) = repo.list_products(query)?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "ID",
        "Name",
        "Description",
        "Category",
        "Image URL",
        "Created At",
        "Updated At",
    ])?;

    for product in products {
        let category = product
            .category
            .map(|category| category.name)
            .unwrap_or_default();

        writer.write_record([
            product.id.to_string(),
            product.name,
            product.description.unwrap_or_default(),
            category,
            product.url,
            product.created_at.format(EXPORT_TIMESTAMP_FORMAT).to_string(),
            product.updated_at.format(EXPORT_TIMESTAMP_FORMAT).to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|err| ServiceError::Csv(err.into_error().into()))
}
