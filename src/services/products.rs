use serde::Deserialize;

use crate::domain::product::{
    NewProduct, Product, ProductListQuery, ProductSortBy, SortOrder, UpdateProduct,
};
use crate::forms::products::{AddProductForm, BulkDeleteForm, EditProductForm, NewProductUpload};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::errors::RepositoryError;
use crate::repository::{CategoryReader, ProductReader, ProductWriter, TagReader};
use crate::services::{ServiceError, ServiceResult};
use crate::storage::ImageStore;

/// Query parameters accepted by the product listing endpoint. Every field is
/// kept as a raw string so that malformed values fall back to defaults
/// instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsQuery {
    /// Optional search string matched against product names.
    pub search: Option<String>,
    /// Page requested by the client (1-based).
    pub page: Option<String>,
    /// Page size requested by the client.
    pub limit: Option<String>,
    /// Column to sort by: `name`, `createdAt` or `updatedAt`.
    pub sort_by: Option<String>,
    /// Sort direction: `asc` or `desc`.
    pub sort_order: Option<String>,
}

/// Returns one page of products with their category and tags attached.
pub fn list_products<R>(repo: &R, query: ProductsQuery) -> ServiceResult<Paginated<Product>>
where
    R: ProductReader + ?Sized,
{
    let ProductsQuery {
        search,
        page,
        limit,
        sort_by,
        sort_order,
    } = query;

    let page = parse_positive(page.as_deref()).unwrap_or(1);
    let per_page = parse_positive(limit.as_deref()).unwrap_or(DEFAULT_ITEMS_PER_PAGE);
    let sort_by = sort_by
        .as_deref()
        .and_then(ProductSortBy::parse)
        .unwrap_or_default();
    let sort_order = sort_order
        .as_deref()
        .and_then(SortOrder::parse)
        .unwrap_or_default();

    let mut list_query = ProductListQuery::new()
        .sort(sort_by, sort_order)
        .paginate(page, per_page);

    if let Some(term) = search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        list_query = list_query.search(term);
    }

    let (total, items) = repo.list_products(list_query)?;

    Ok(Paginated::new(items, total, page, per_page))
}

/// Fetches a single product by its identifier.
pub fn get_product<R>(repo: &R, product_id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    match repo.get_product_by_id(product_id)? {
        Some(product) => Ok(product),
        None => Err(ServiceError::NotFound("Product not found".to_string())),
    }
}

/// Creates a product from a multipart upload. The image file is written to
/// the store only after the form, category and tags all validate.
pub fn create_product<R>(
    repo: &R,
    store: &ImageStore,
    base_url: &str,
    form: AddProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + CategoryReader + TagReader + ?Sized,
{
    let upload = form
        .into_new_upload()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    store.validate(&upload.image.file_name, upload.image.bytes.len())?;
    ensure_references_exist(repo, upload.category_id, &upload.tag_ids)?;

    let NewProductUpload {
        name,
        description,
        category_id,
        tag_ids,
        image,
    } = upload;

    let stored = store.store(&image.file_name, &image.bytes)?;
    let url = image_url(base_url, &stored);

    let mut new_product = NewProduct::new(name, stored, url);
    if let Some(description) = description {
        new_product = new_product.with_description(description);
    }
    if let Some(category_id) = category_id {
        new_product = new_product.with_category_id(category_id);
    }
    if !tag_ids.is_empty() {
        new_product = new_product.with_tag_ids(tag_ids);
    }

    Ok(repo.create_product(&new_product)?)
}

/// Updates a product from a multipart upload. A replacement image, when
/// present, is stored first; the prior file is removed only after the record
/// points at the new one, and only if the name actually changed.
pub fn update_product<R>(
    repo: &R,
    store: &ImageStore,
    base_url: &str,
    product_id: i32,
    form: EditProductForm,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + CategoryReader + TagReader + ?Sized,
{
    let upload = form
        .into_update_upload()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let existing = match repo.get_product_by_id(product_id)? {
        Some(product) => product,
        None => return Err(ServiceError::NotFound("Product not found".to_string())),
    };

    if let Some(image) = upload.image.as_ref() {
        store.validate(&image.file_name, image.bytes.len())?;
    }
    ensure_references_exist(
        repo,
        upload.category_id,
        upload.tag_ids.as_deref().unwrap_or_default(),
    )?;

    let mut updates = UpdateProduct::new();
    if let Some(name) = upload.name {
        updates = updates.name(name);
    }
    if let Some(description) = upload.description {
        updates = updates.description(description);
    }
    if let Some(category_id) = upload.category_id {
        updates = updates.category_id(Some(category_id));
    }
    if let Some(tag_ids) = upload.tag_ids {
        updates = updates.tag_ids(tag_ids);
    }

    let mut replaced_file = None;
    if let Some(image) = upload.image {
        let stored = store.store(&image.file_name, &image.bytes)?;
        let url = image_url(base_url, &stored);
        if existing.image != stored {
            replaced_file = Some(existing.image.clone());
        }
        updates = updates.image(stored, url);
    }

    let updated = repo.update_product(product_id, &updates)?;

    if let Some(old_file) = replaced_file {
        if let Err(err) = store.delete(&old_file) {
            log::error!("Failed to remove replaced image {old_file}: {err}");
        }
    }

    Ok(updated)
}

/// Deletes a product record, then best-effort removes its image file.
pub fn delete_product<R>(repo: &R, store: &ImageStore, product_id: i32) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let deleted = match repo.delete_product(product_id) {
        Ok(product) => product,
        Err(RepositoryError::NotFound) => {
            return Err(ServiceError::NotFound("Product not found".to_string()));
        }
        Err(err) => return Err(err.into()),
    };

    remove_product_file(store, &deleted);

    Ok(deleted)
}

/// Deletes every product matching a valid candidate ID, then best-effort
/// removes their image files. Non-numeric candidates are dropped silently.
pub fn delete_products<R>(
    repo: &R,
    store: &ImageStore,
    form: BulkDeleteForm,
) -> ServiceResult<Vec<Product>>
where
    R: ProductWriter + ?Sized,
{
    if form.ids.is_empty() {
        return Err(ServiceError::Form("No product IDs provided".to_string()));
    }

    let ids = form.valid_ids();
    if ids.is_empty() {
        return Err(ServiceError::Form(
            "No valid product IDs provided".to_string(),
        ));
    }

    let deleted = repo.delete_products(&ids)?;
    if deleted.is_empty() {
        return Err(ServiceError::NotFound(
            "No products found with provided IDs".to_string(),
        ));
    }

    for product in &deleted {
        remove_product_file(store, product);
    }

    Ok(deleted)
}

fn ensure_references_exist<R>(
    repo: &R,
    category_id: Option<i32>,
    tag_ids: &[i32],
) -> ServiceResult<()>
where
    R: CategoryReader + TagReader + ?Sized,
{
    if let Some(category_id) = category_id {
        if repo.get_category_by_id(category_id)?.is_none() {
            return Err(ServiceError::NotFound("Category not found".to_string()));
        }
    }

    if !tag_ids.is_empty() {
        let known = repo.get_tags_by_ids(tag_ids)?;
        if known.len() != tag_ids.len() {
            return Err(ServiceError::NotFound(
                "One or more tags not found".to_string(),
            ));
        }
    }

    Ok(())
}

fn image_url(base_url: &str, stored_name: &str) -> String {
    format!("{base_url}/images/{stored_name}")
}

fn parse_positive(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| *value >= 1)
}

fn remove_product_file(store: &ImageStore, product: &Product) {
    if let Err(err) = store.delete(&product.image) {
        log::error!("Failed to remove image {}: {err}", product.image);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::{Seek, SeekFrom, Write};
    use std::path::Path;

    use actix_multipart::form::tempfile::TempFile;
    use actix_multipart::form::text::Text;
    use chrono::{NaiveDate, NaiveDateTime};
    use tempfile::NamedTempFile;

    use crate::domain::category::Category;
    use crate::domain::product::NewProduct;
    use crate::domain::tag::Tag;
    use crate::repository::errors::RepositoryResult;
    use crate::repository::mock::{
        MockCategoryReader, MockProductReader, MockProductWriter, MockTagReader,
    };
    use crate::storage::UploadPolicy;

    // md5("hello")
    const HELLO_HASH: &str = "5d41402abc4b2a76b9719d911017c592";

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn sample_product(id: i32, name: &str, image: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: None,
            image: image.to_string(),
            url: format!("http://localhost:5000/images/{image}"),
            category_id: None,
            category: None,
            tags: Vec::new(),
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    fn sample_category(id: i32, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    fn sample_tag(id: i32, name: &str) -> Tag {
        Tag {
            id,
            name: name.to_string(),
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    fn temp_store(dir: &Path) -> ImageStore {
        ImageStore::new(dir, UploadPolicy::default()).expect("create store")
    }

    fn build_temp_file(file_name: &str, bytes: &[u8]) -> TempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(bytes).expect("write file contents");
        file.as_file_mut()
            .seek(SeekFrom::Start(0))
            .expect("seek to start");

        TempFile {
            file,
            content_type: None,
            file_name: Some(file_name.to_string()),
            size: bytes.len(),
        }
    }

    fn text(value: &str) -> Option<Text<String>> {
        Some(Text(value.to_string()))
    }

    fn add_form(name: Option<&str>, file: Option<(&str, &[u8])>) -> AddProductForm {
        AddProductForm {
            name: name.and_then(text),
            description: None,
            category_id: None,
            tag_ids: None,
            file: file.map(|(file_name, bytes)| build_temp_file(file_name, bytes)),
        }
    }

    fn empty_edit_form() -> EditProductForm {
        EditProductForm {
            name: None,
            description: None,
            category_id: None,
            tag_ids: None,
            file: None,
        }
    }

    #[test]
    fn list_products_builds_query_from_parameters() {
        let mut repo = FakeRepo::new();

        repo.product_reader
            .expect_list_products()
            .times(1)
            .withf(|qry| {
                assert_eq!(qry.search.as_deref(), Some("sun"));
                assert_eq!(qry.sort_by, ProductSortBy::Name);
                assert_eq!(qry.sort_order, SortOrder::Asc);
                match &qry.pagination {
                    Some(pagination) => {
                        assert_eq!(pagination.page, 2);
                        assert_eq!(pagination.per_page, 5);
                    }
                    None => panic!("expected pagination to be set"),
                }
                true
            })
            .returning(|_| {
                Ok((
                    12,
                    vec![
                        sample_product(1, "Sunset", "a.png"),
                        sample_product(2, "Sunrise", "b.png"),
                    ],
                ))
            });

        let query = ProductsQuery {
            search: Some("sun".to_string()),
            page: Some("2".to_string()),
            limit: Some("5".to_string()),
            sort_by: Some("name".to_string()),
            sort_order: Some("asc".to_string()),
        };

        let page = list_products(&repo, query).expect("expected success");

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination.current_page, 2);
        assert_eq!(page.pagination.total_items, 12);
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.pagination.items_per_page, 5);
    }

    #[test]
    fn list_products_defaults_on_malformed_parameters() {
        let mut repo = FakeRepo::new();

        repo.product_reader
            .expect_list_products()
            .times(1)
            .withf(|qry| {
                assert!(qry.search.is_none());
                assert_eq!(qry.sort_by, ProductSortBy::CreatedAt);
                assert_eq!(qry.sort_order, SortOrder::Desc);
                match &qry.pagination {
                    Some(pagination) => {
                        assert_eq!(pagination.page, 1);
                        assert_eq!(pagination.per_page, DEFAULT_ITEMS_PER_PAGE);
                    }
                    None => panic!("expected pagination to be set"),
                }
                true
            })
            .returning(|_| Ok((0, Vec::new())));

        let query = ProductsQuery {
            search: Some("   ".to_string()),
            page: Some("abc".to_string()),
            limit: Some("-5".to_string()),
            sort_by: Some("bogus".to_string()),
            sort_order: Some("sideways".to_string()),
        };

        let page = list_products(&repo, query).expect("expected success");

        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_pages, 0);
    }

    #[test]
    fn get_product_reports_missing_product() {
        let mut repo = FakeRepo::new();

        repo.product_reader
            .expect_get_product_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let result = get_product(&repo, 77);

        assert!(
            matches!(result, Err(ServiceError::NotFound(msg)) if msg == "Product not found")
        );
    }

    #[test]
    fn create_product_stores_file_and_persists_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = temp_store(dir.path());
        let mut repo = FakeRepo::new();

        repo.category_reader
            .expect_get_category_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_category(id, "Nature"))));

        repo.tag_reader
            .expect_get_tags_by_ids()
            .times(1)
            .returning(|ids| Ok(ids.iter().map(|id| sample_tag(*id, "tag")).collect()));

        let expected_image = format!("{HELLO_HASH}.jpg");
        let expected_url = format!("http://localhost:5000/images/{expected_image}");
        let expected = (expected_image.clone(), expected_url.clone());
        repo.product_writer
            .expect_create_product()
            .times(1)
            .withf(move |new_product: &NewProduct| {
                assert_eq!(new_product.name, "Sunset");
                assert_eq!(new_product.description.as_deref(), Some("Evening shot"));
                assert_eq!(new_product.image, expected.0);
                assert_eq!(new_product.url, expected.1);
                assert_eq!(new_product.category_id, Some(3));
                assert_eq!(new_product.tag_ids, vec![1, 2]);
                true
            })
            .returning(|new_product| {
                let mut product = sample_product(10, &new_product.name, &new_product.image);
                product.url = new_product.url.clone();
                Ok(product)
            });

        let form = AddProductForm {
            name: text(" Sunset "),
            description: text("Evening shot"),
            category_id: text("3"),
            tag_ids: text("[1,2]"),
            file: Some(build_temp_file("photo.jpg", b"hello")),
        };

        let product = create_product(&repo, &store, "http://localhost:5000", form)
            .expect("expected success");

        assert_eq!(product.id, 10);
        assert_eq!(product.image, expected_image);
        assert!(dir.path().join(&expected_image).exists());
    }

    #[test]
    fn create_product_requires_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = temp_store(dir.path());
        let repo = FakeRepo::new();

        let form = add_form(None, Some(("photo.png", b"hello")));

        let result = create_product(&repo, &store, "http://localhost:5000", form);

        assert!(matches!(result, Err(ServiceError::Form(msg)) if msg == "Name cannot be null"));
    }

    #[test]
    fn create_product_requires_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = temp_store(dir.path());
        let repo = FakeRepo::new();

        let form = add_form(Some("Sunset"), None);

        let result = create_product(&repo, &store, "http://localhost:5000", form);

        assert!(matches!(result, Err(ServiceError::Form(msg)) if msg == "No file uploaded"));
    }

    #[test]
    fn create_product_rejects_disallowed_extension_before_anything_else() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = temp_store(dir.path());
        let repo = FakeRepo::new();

        let form = add_form(Some("Sunset"), Some(("script.exe", b"hello")));

        let result = create_product(&repo, &store, "http://localhost:5000", form);

        assert!(
            matches!(result, Err(ServiceError::Unprocessable(msg)) if msg == "Invalid image type")
        );
        assert!(
            fs::read_dir(dir.path())
                .expect("read dir")
                .next()
                .is_none(),
            "nothing may be written for a rejected upload"
        );
    }

    #[test]
    fn create_product_rejects_unknown_tags_without_storing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = temp_store(dir.path());
        let mut repo = FakeRepo::new();

        repo.tag_reader
            .expect_get_tags_by_ids()
            .times(1)
            .returning(|_| Ok(vec![sample_tag(1, "nature")]));

        let form = AddProductForm {
            name: text("Sunset"),
            description: None,
            category_id: None,
            tag_ids: text("[1,99]"),
            file: Some(build_temp_file("photo.png", b"hello")),
        };

        let result = create_product(&repo, &store, "http://localhost:5000", form);

        assert!(
            matches!(result, Err(ServiceError::NotFound(msg)) if msg == "One or more tags not found")
        );
        assert!(
            fs::read_dir(dir.path())
                .expect("read dir")
                .next()
                .is_none(),
            "nothing may be written for a rejected upload"
        );
    }

    #[test]
    fn update_product_replaces_image_and_removes_old_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = temp_store(dir.path());
        let mut repo = FakeRepo::new();

        fs::write(dir.path().join("oldhash.png"), b"old bytes").expect("seed old file");

        repo.product_reader
            .expect_get_product_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_product(id, "Sunset", "oldhash.png"))));

        let expected_image = format!("{HELLO_HASH}.jpg");
        let expected = expected_image.clone();
        repo.product_writer
            .expect_update_product()
            .times(1)
            .withf(move |product_id, updates| {
                assert_eq!(*product_id, 5);
                assert!(updates.name.is_none());
                match updates.image.as_ref() {
                    Some((image, url)) => {
                        assert_eq!(image, &expected);
                        assert_eq!(url, &format!("http://localhost:5000/images/{expected}"));
                    }
                    None => panic!("expected an image update"),
                }
                true
            })
            .returning(|_, updates| {
                let (image, url) = updates.image.clone().unwrap_or_default();
                let mut product = sample_product(5, "Sunset", &image);
                product.url = url;
                Ok(product)
            });

        let form = EditProductForm {
            file: Some(build_temp_file("new.jpg", b"hello")),
            ..empty_edit_form()
        };

        let updated = update_product(&repo, &store, "http://localhost:5000", 5, form)
            .expect("expected success");

        assert_eq!(updated.image, expected_image);
        assert!(dir.path().join(&expected_image).exists());
        assert!(
            !dir.path().join("oldhash.png").exists(),
            "replaced file must be removed"
        );
    }

    #[test]
    fn update_product_keeps_file_when_content_is_identical() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = temp_store(dir.path());
        let mut repo = FakeRepo::new();

        let stored_name = format!("{HELLO_HASH}.jpg");
        fs::write(dir.path().join(&stored_name), b"hello").expect("seed file");

        let existing_name = stored_name.clone();
        repo.product_reader
            .expect_get_product_by_id()
            .times(1)
            .returning(move |id| Ok(Some(sample_product(id, "Sunset", &existing_name))));

        repo.product_writer
            .expect_update_product()
            .times(1)
            .returning(|id, updates| {
                let (image, url) = updates.image.clone().unwrap_or_default();
                let mut product = sample_product(id, "Sunset", &image);
                product.url = url;
                Ok(product)
            });

        let form = EditProductForm {
            file: Some(build_temp_file("same.jpg", b"hello")),
            ..empty_edit_form()
        };

        update_product(&repo, &store, "http://localhost:5000", 5, form)
            .expect("expected success");

        assert!(
            dir.path().join(&stored_name).exists(),
            "identical content must not delete the stored file"
        );
    }

    #[test]
    fn update_product_reports_missing_product() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = temp_store(dir.path());
        let mut repo = FakeRepo::new();

        repo.product_reader
            .expect_get_product_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let form = EditProductForm {
            name: text("New name"),
            ..empty_edit_form()
        };

        let result = update_product(&repo, &store, "http://localhost:5000", 404, form);

        assert!(
            matches!(result, Err(ServiceError::NotFound(msg)) if msg == "Product not found")
        );
    }

    #[test]
    fn delete_product_removes_record_then_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = temp_store(dir.path());
        let mut repo = FakeRepo::new();

        fs::write(dir.path().join("gone.png"), b"bytes").expect("seed file");

        repo.product_writer
            .expect_delete_product()
            .times(1)
            .returning(|id| Ok(sample_product(id, "Sunset", "gone.png")));

        let deleted = delete_product(&repo, &store, 9).expect("expected success");

        assert_eq!(deleted.id, 9);
        assert!(!dir.path().join("gone.png").exists());
    }

    #[test]
    fn delete_product_survives_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = temp_store(dir.path());
        let mut repo = FakeRepo::new();

        repo.product_writer
            .expect_delete_product()
            .times(1)
            .returning(|id| Ok(sample_product(id, "Sunset", "never-existed.png")));

        let deleted = delete_product(&repo, &store, 9).expect("expected success");

        assert_eq!(deleted.id, 9);
    }

    #[test]
    fn delete_products_filters_candidates_and_reports_deletions() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = temp_store(dir.path());
        let mut repo = FakeRepo::new();

        fs::write(dir.path().join("one.png"), b"1").expect("seed file");

        repo.product_writer
            .expect_delete_products()
            .times(1)
            .withf(|ids| {
                assert_eq!(ids, [1, 2]);
                true
            })
            .returning(|_| Ok(vec![sample_product(1, "Sunset", "one.png")]));

        let form: BulkDeleteForm =
            serde_json::from_str(r#"{"ids": [1, "2", "x"]}"#).expect("valid json");

        let deleted = delete_products(&repo, &store, form).expect("expected success");

        assert_eq!(deleted.len(), 1);
        assert!(!dir.path().join("one.png").exists());
    }

    #[test]
    fn delete_products_rejects_empty_candidate_list() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = temp_store(dir.path());
        let repo = FakeRepo::new();

        let form: BulkDeleteForm = serde_json::from_str(r#"{"ids": []}"#).expect("valid json");

        let result = delete_products(&repo, &store, form);

        assert!(
            matches!(result, Err(ServiceError::Form(msg)) if msg == "No product IDs provided")
        );
    }

    #[test]
    fn delete_products_rejects_all_invalid_candidates() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = temp_store(dir.path());
        let repo = FakeRepo::new();

        let form: BulkDeleteForm =
            serde_json::from_str(r#"{"ids": ["x", "y"]}"#).expect("valid json");

        let result = delete_products(&repo, &store, form);

        assert!(
            matches!(result, Err(ServiceError::Form(msg)) if msg == "No valid product IDs provided")
        );
    }

    #[test]
    fn delete_products_reports_zero_matches() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = temp_store(dir.path());
        let mut repo = FakeRepo::new();

        repo.product_writer
            .expect_delete_products()
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let form: BulkDeleteForm = serde_json::from_str(r#"{"ids": [41]}"#).expect("valid json");

        let result = delete_products(&repo, &store, form);

        assert!(
            matches!(result, Err(ServiceError::NotFound(msg)) if msg == "No products found with provided IDs")
        );
    }

    struct FakeRepo {
        product_reader: MockProductReader,
        product_writer: MockProductWriter,
        category_reader: MockCategoryReader,
        tag_reader: MockTagReader,
    }

    impl FakeRepo {
        fn new() -> Self {
            Self {
                product_reader: MockProductReader::new(),
                product_writer: MockProductWriter::new(),
                category_reader: MockCategoryReader::new(),
                tag_reader: MockTagReader::new(),
            }
        }
    }

    impl ProductReader for FakeRepo {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>> {
            self.product_reader.get_product_by_id(id)
        }

        fn list_products(
            &self,
            query: ProductListQuery,
        ) -> RepositoryResult<(usize, Vec<Product>)> {
            self.product_reader.list_products(query)
        }

        fn list_products_by_tag(&self, tag_id: i32) -> RepositoryResult<Vec<Product>> {
            self.product_reader.list_products_by_tag(tag_id)
        }
    }

    impl ProductWriter for FakeRepo {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
            self.product_writer.create_product(new_product)
        }

        fn update_product(
            &self,
            product_id: i32,
            updates: &UpdateProduct,
        ) -> RepositoryResult<Product> {
            self.product_writer.update_product(product_id, updates)
        }

        fn delete_product(&self, product_id: i32) -> RepositoryResult<Product> {
            self.product_writer.delete_product(product_id)
        }

        fn delete_products(&self, product_ids: &[i32]) -> RepositoryResult<Vec<Product>> {
            self.product_writer.delete_products(product_ids)
        }
    }

    impl CategoryReader for FakeRepo {
        fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>> {
            self.category_reader.get_category_by_id(id)
        }

        fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
            self.category_reader.list_categories()
        }
    }

    impl TagReader for FakeRepo {
        fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<Tag>> {
            self.tag_reader.get_tag_by_id(id)
        }

        fn get_tag_by_name(&self, name: &str) -> RepositoryResult<Option<Tag>> {
            self.tag_reader.get_tag_by_name(name)
        }

        fn get_tags_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Tag>> {
            self.tag_reader.get_tags_by_ids(ids)
        }

        fn list_tags(&self) -> RepositoryResult<Vec<Tag>> {
            self.tag_reader.list_tags()
        }

        fn is_tag_assigned(&self, product_id: i32, tag_id: i32) -> RepositoryResult<bool> {
            self.tag_reader.is_tag_assigned(product_id, tag_id)
        }
    }
}
