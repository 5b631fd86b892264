use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::forms::categories::{AddCategoryForm, EditCategoryForm};
use crate::repository::DieselRepository;
use crate::routes::{ApiResponse, error_response, invalid_id_response, parse_id};
use crate::services::categories;

#[get("/categories")]
pub async fn list_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match categories::list_categories(repo.get_ref()) {
        Ok(list) => HttpResponse::Ok().json(ApiResponse::new("success", list)),
        Err(err) => error_response(err, "Failed to list categories"),
    }
}

#[get("/categories/{id}")]
pub async fn get_category(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Some(category_id) = parse_id(&path) else {
        return invalid_id_response();
    };

    match categories::get_category(repo.get_ref(), category_id) {
        Ok(category) => HttpResponse::Ok().json(ApiResponse::new("success", category)),
        Err(err) => error_response(err, "Failed to fetch category"),
    }
}

#[post("/categories")]
pub async fn add_category(
    form: web::Json<AddCategoryForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match categories::create_category(repo.get_ref(), form.into_inner()) {
        Ok(category) => {
            HttpResponse::Created().json(ApiResponse::new("Category created successfully", category))
        }
        Err(err) => error_response(err, "Failed to create category"),
    }
}

#[put("/categories/{id}")]
pub async fn update_category(
    path: web::Path<String>,
    form: web::Json<EditCategoryForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Some(category_id) = parse_id(&path) else {
        return invalid_id_response();
    };

    match categories::update_category(repo.get_ref(), category_id, form.into_inner()) {
        Ok(category) => {
            HttpResponse::Ok().json(ApiResponse::new("Category updated successfully", category))
        }
        Err(err) => error_response(err, "Failed to update category"),
    }
}

#[delete("/categories/{id}")]
pub async fn delete_category(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Some(category_id) = parse_id(&path) else {
        return invalid_id_response();
    };

    match categories::delete_category(repo.get_ref(), category_id) {
        Ok(category) => {
            HttpResponse::Ok().json(ApiResponse::new("Category deleted successfully", category))
        }
        Err(err) => error_response(err, "Failed to delete category"),
    }
}
