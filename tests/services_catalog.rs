use serde_json::json;

use pixstock::domain::product::{NewProduct, Product};
use pixstock::forms::categories::{AddCategoryForm, EditCategoryForm};
use pixstock::forms::favorites::AddFavoriteForm;
use pixstock::forms::tags::{AddTagForm, AssignTagForm};
use pixstock::repository::{DieselRepository, ProductWriter};
use pixstock::services::{ServiceError, categories, exports, favorites, tags};

mod common;

fn seed_product(repo: &DieselRepository, name: &str) -> Product {
    let image = format!("{}.jpg", name.to_lowercase());
    let url = format!("http://localhost:3000/images/{image}");
    repo.create_product(&NewProduct::new(name, image, url))
        .expect("seed product")
}

#[test]
fn category_service_reports_wire_messages() {
    let test_db = common::TestDb::new("service_category_wire_messages.db");
    let repo = DieselRepository::new(test_db.pool());

    let form = AddCategoryForm {
        name: Some("Nature".to_string()),
    };
    let category = categories::create_category(&repo, form).expect("create category");
    assert_eq!(category.name, "Nature");

    let duplicate = AddCategoryForm {
        name: Some("Nature".to_string()),
    };
    let err = categories::create_category(&repo, duplicate).expect_err("duplicate category");
    assert!(matches!(err, ServiceError::Conflict(msg) if msg == "Category already exists"));

    // A blank replacement name keeps the stored one.
    let unchanged = categories::update_category(
        &repo,
        category.id,
        EditCategoryForm {
            name: Some("   ".to_string()),
        },
    )
    .expect("update category");
    assert_eq!(unchanged.name, "Nature");

    let err = categories::update_category(
        &repo,
        9999,
        EditCategoryForm {
            name: Some("Anything".to_string()),
        },
    )
    .expect_err("missing category");
    assert!(matches!(err, ServiceError::NotFound(msg) if msg == "Category not found"));

    let product = seed_product(&repo, "Sunset");
    let assigned = categories::update_category(
        &repo,
        category.id,
        EditCategoryForm {
            name: Some("Outdoors".to_string()),
        },
    )
    .expect("rename category");
    assert_eq!(assigned.name, "Outdoors");

    // Attach the product, then deletion is blocked.
    use pixstock::domain::product::UpdateProduct;
    repo.update_product(
        product.id,
        &UpdateProduct::new().category_id(Some(category.id)),
    )
    .expect("attach category");

    let err = categories::delete_category(&repo, category.id).expect_err("blocked delete");
    assert!(
        matches!(err, ServiceError::Conflict(msg) if msg == "Cannot delete category with associated products")
    );

    repo.update_product(product.id, &UpdateProduct::new().category_id(None))
        .expect("detach category");
    categories::delete_category(&repo, category.id).expect("delete category");

    let err = categories::get_category(&repo, category.id).expect_err("category is gone");
    assert!(matches!(err, ServiceError::NotFound(msg) if msg == "Category not found"));
}

#[test]
fn tag_service_assignment_flow() {
    let test_db = common::TestDb::new("service_tag_assignment_flow.db");
    let repo = DieselRepository::new(test_db.pool());

    let product = seed_product(&repo, "Sunset");

    let tag = tags::create_tag(
        &repo,
        AddTagForm {
            name: Some("sunset".to_string()),
        },
    )
    .expect("create tag");

    let err = tags::create_tag(
        &repo,
        AddTagForm {
            name: Some("sunset".to_string()),
        },
    )
    .expect_err("duplicate tag");
    assert!(matches!(err, ServiceError::Conflict(msg) if msg == "Tag already exists"));

    let err = tags::assign_tag(
        &repo,
        AssignTagForm {
            product_id: Some(json!(9999)),
            tag_id: Some(json!(tag.id)),
        },
    )
    .expect_err("missing product");
    assert!(matches!(err, ServiceError::NotFound(msg) if msg == "Product not found"));

    let assignment = tags::assign_tag(
        &repo,
        AssignTagForm {
            product_id: Some(json!(product.id)),
            tag_id: Some(json!(tag.id.to_string())),
        },
    )
    .expect("assign tag");
    assert_eq!(assignment.product_id, product.id);
    assert_eq!(assignment.tag_id, tag.id);

    let err = tags::assign_tag(
        &repo,
        AssignTagForm {
            product_id: Some(json!(product.id)),
            tag_id: Some(json!(tag.id)),
        },
    )
    .expect_err("duplicate assignment");
    assert!(
        matches!(err, ServiceError::Conflict(msg) if msg == "Tag already assigned to this product")
    );

    let with_products = tags::get_tag_with_products(&repo, "sunset").expect("tag with products");
    assert_eq!(with_products.id, tag.id);
    assert_eq!(with_products.products.len(), 1);
    assert_eq!(with_products.products[0].id, product.id);

    tags::unassign_tag(&repo, product.id, tag.id).expect("unassign tag");
    let err = tags::unassign_tag(&repo, product.id, tag.id).expect_err("assignment is gone");
    assert!(
        matches!(err, ServiceError::NotFound(msg) if msg == "Tag not assigned to this product")
    );
}

#[test]
fn favorites_cycle_round_trips() {
    let test_db = common::TestDb::new("service_favorites_cycle_round_trips.db");
    let repo = DieselRepository::new(test_db.pool());

    let product = seed_product(&repo, "Sunset");

    assert!(!favorites::is_favorite(&repo, product.id).expect("check favorite"));

    let favorited = favorites::add_favorite(
        &repo,
        AddFavoriteForm {
            product_id: Some(json!(product.id)),
        },
    )
    .expect("add favorite");
    assert_eq!(favorited.id, product.id);

    assert!(favorites::is_favorite(&repo, product.id).expect("check favorite"));

    let err = favorites::add_favorite(
        &repo,
        AddFavoriteForm {
            product_id: Some(json!(product.id)),
        },
    )
    .expect_err("duplicate favorite");
    assert!(matches!(err, ServiceError::Conflict(msg) if msg == "Product already in favorites"));

    let listed = favorites::list_favorites(&repo).expect("list favorites");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, product.id);

    favorites::remove_favorite(&repo, product.id).expect("remove favorite");
    assert!(!favorites::is_favorite(&repo, product.id).expect("check favorite"));

    let err = favorites::remove_favorite(&repo, product.id).expect_err("favorite is gone");
    assert!(matches!(err, ServiceError::NotFound(msg) if msg == "Product not in favorites"));
}

#[test]
fn export_renders_catalog_as_csv() {
    let test_db = common::TestDb::new("service_export_renders_catalog_as_csv.db");
    let repo = DieselRepository::new(test_db.pool());

    let category = categories::create_category(
        &repo,
        AddCategoryForm {
            name: Some("Nature".to_string()),
        },
    )
    .expect("create category");

    let product = seed_product(&repo, "Sunset");
    use pixstock::domain::product::UpdateProduct;
    let product = repo
        .update_product(
            product.id,
            &UpdateProduct::new()
                .description("Evening sky")
                .category_id(Some(category.id)),
        )
        .expect("attach relations");

    let bytes = exports::export_products_csv(&repo).expect("export csv");
    let text = String::from_utf8(bytes).expect("utf-8 csv");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines[0],
        "ID,Name,Description,Category,Image URL,Created At,Updated At"
    );
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with(&format!(
        "{},Sunset,Evening sky,Nature,{}",
        product.id, product.url
    )));
    assert!(lines[1].ends_with('Z'));
}
