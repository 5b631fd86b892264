use actix_web::{HttpResponse, Responder, delete, get, post, web};

use crate::forms::favorites::AddFavoriteForm;
use crate::repository::DieselRepository;
use crate::routes::{ApiResponse, error_response, invalid_id_response, parse_id};
use crate::services::favorites;

#[get("/favorites")]
pub async fn list_favorites(repo: web::Data<DieselRepository>) -> impl Responder {
    match favorites::list_favorites(repo.get_ref()) {
        Ok(products) => HttpResponse::Ok().json(ApiResponse::new("success", products)),
        Err(err) => error_response(err, "Failed to list favorites"),
    }
}

#[get("/favorites/{product_id}")]
pub async fn is_favorite(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Some(product_id) = parse_id(&path) else {
        return invalid_id_response();
    };

    match favorites::is_favorite(repo.get_ref(), product_id) {
        Ok(flag) => HttpResponse::Ok().json(ApiResponse::new("success", flag)),
        Err(err) => error_response(err, "Failed to check favorite"),
    }
}

#[post("/favorites")]
pub async fn add_favorite(
    form: web::Json<AddFavoriteForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match favorites::add_favorite(repo.get_ref(), form.into_inner()) {
        Ok(product) => HttpResponse::Created().json(ApiResponse::new("Added to favorites", product)),
        Err(err) => error_response(err, "Failed to add favorite"),
    }
}

#[delete("/favorites/{product_id}")]
pub async fn remove_favorite(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Some(product_id) = parse_id(&path) else {
        return invalid_id_response();
    };

    match favorites::remove_favorite(repo.get_ref(), product_id) {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::message_only("Removed from favorites")),
        Err(err) => error_response(err, "Failed to remove favorite"),
    }
}
