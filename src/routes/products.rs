use actix_multipart::form::MultipartForm;
use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, post, put, web};

use crate::forms::products::{AddProductForm, BulkDeleteForm, EditProductForm};
use crate::pagination::Paginated;
use crate::repository::DieselRepository;
use crate::routes::{ApiResponse, error_response, invalid_id_response, parse_id};
use crate::services::products;
use crate::storage::ImageStore;

/// Scheme and host the request arrived on, used to build public image URLs.
fn request_base_url(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}", info.scheme(), info.host())
}

#[get("/products")]
pub async fn list_products(
    params: web::Query<products::ProductsQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::list_products(repo.get_ref(), params.into_inner()) {
        Ok(Paginated { items, pagination }) => {
            HttpResponse::Ok().json(ApiResponse::new("success", items).with_pagination(pagination))
        }
        Err(err) => error_response(err, "Failed to list products"),
    }
}

#[get("/products/{id}")]
pub async fn get_product(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Some(product_id) = parse_id(&path) else {
        return invalid_id_response();
    };

    match products::get_product(repo.get_ref(), product_id) {
        Ok(product) => HttpResponse::Ok().json(ApiResponse::new("success", product)),
        Err(err) => error_response(err, "Failed to fetch product"),
    }
}

#[post("/products")]
pub async fn add_product(
    req: HttpRequest,
    MultipartForm(form): MultipartForm<AddProductForm>,
    repo: web::Data<DieselRepository>,
    store: web::Data<ImageStore>,
) -> impl Responder {
    let base_url = request_base_url(&req);

    match products::create_product(repo.get_ref(), store.get_ref(), &base_url, form) {
        Ok(product) => {
            HttpResponse::Created().json(ApiResponse::new("Inserted successfully", product))
        }
        Err(err) => error_response(err, "Failed to create product"),
    }
}

#[put("/products/{id}")]
pub async fn update_product(
    req: HttpRequest,
    path: web::Path<String>,
    MultipartForm(form): MultipartForm<EditProductForm>,
    repo: web::Data<DieselRepository>,
    store: web::Data<ImageStore>,
) -> impl Responder {
    let Some(product_id) = parse_id(&path) else {
        return invalid_id_response();
    };
    let base_url = request_base_url(&req);

    match products::update_product(repo.get_ref(), store.get_ref(), &base_url, product_id, form) {
        Ok(product) => HttpResponse::Ok().json(ApiResponse::new("Updated successfully", product)),
        Err(err) => error_response(err, "Failed to update product"),
    }
}

#[delete("/products/{id}")]
pub async fn delete_product(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
    store: web::Data<ImageStore>,
) -> impl Responder {
    let Some(product_id) = parse_id(&path) else {
        return invalid_id_response();
    };

    match products::delete_product(repo.get_ref(), store.get_ref(), product_id) {
        Ok(product) => HttpResponse::Ok().json(ApiResponse::new("Deleted successfully", product)),
        Err(err) => error_response(err, "Failed to delete product"),
    }
}

#[post("/products/bulk-delete")]
pub async fn bulk_delete_products(
    form: web::Json<BulkDeleteForm>,
    repo: web::Data<DieselRepository>,
    store: web::Data<ImageStore>,
) -> impl Responder {
    match products::delete_products(repo.get_ref(), store.get_ref(), form.into_inner()) {
        Ok(deleted) => HttpResponse::Ok().json(ApiResponse::new(
            format!("Successfully deleted {} product(s)", deleted.len()),
            deleted,
        )),
        Err(err) => error_response(err, "Failed to bulk delete products"),
    }
}
