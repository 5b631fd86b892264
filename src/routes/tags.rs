use actix_web::{HttpResponse, Responder, delete, get, post, web};

use crate::forms::tags::{AddTagForm, AssignTagForm};
use crate::repository::DieselRepository;
use crate::routes::{ApiResponse, error_response, invalid_id_response, parse_id};
use crate::services::tags;

#[get("/tags")]
pub async fn list_tags(repo: web::Data<DieselRepository>) -> impl Responder {
    match tags::list_tags(repo.get_ref()) {
        Ok(list) => HttpResponse::Ok().json(ApiResponse::new("success", list)),
        Err(err) => error_response(err, "Failed to list tags"),
    }
}

#[get("/tags/name/{name}")]
pub async fn get_tag_by_name(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match tags::get_tag_with_products(repo.get_ref(), &path) {
        Ok(tag) => HttpResponse::Ok().json(ApiResponse::new("success", tag)),
        Err(err) => error_response(err, "Failed to fetch tag by name"),
    }
}

#[get("/tags/{id}")]
pub async fn get_tag(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Some(tag_id) = parse_id(&path) else {
        return invalid_id_response();
    };

    match tags::get_tag(repo.get_ref(), tag_id) {
        Ok(tag) => HttpResponse::Ok().json(ApiResponse::new("success", tag)),
        Err(err) => error_response(err, "Failed to fetch tag"),
    }
}

#[post("/tags")]
pub async fn add_tag(
    form: web::Json<AddTagForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match tags::create_tag(repo.get_ref(), form.into_inner()) {
        Ok(tag) => HttpResponse::Created().json(ApiResponse::new("Tag created successfully", tag)),
        Err(err) => error_response(err, "Failed to create tag"),
    }
}

#[post("/tags/product")]
pub async fn assign_tag(
    form: web::Json<AssignTagForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match tags::assign_tag(repo.get_ref(), form.into_inner()) {
        Ok(product_tag) => HttpResponse::Created().json(ApiResponse::new(
            "Tag assigned to product successfully",
            product_tag,
        )),
        Err(err) => error_response(err, "Failed to assign tag"),
    }
}

#[delete("/tags/product/{product_id}/{tag_id}")]
pub async fn unassign_tag(
    path: web::Path<(String, String)>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (raw_product_id, raw_tag_id) = path.into_inner();
    let (Some(product_id), Some(tag_id)) = (parse_id(&raw_product_id), parse_id(&raw_tag_id))
    else {
        return invalid_id_response();
    };

    match tags::unassign_tag(repo.get_ref(), product_id, tag_id) {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::message_only(
            "Tag removed from product successfully",
        )),
        Err(err) => error_response(err, "Failed to unassign tag"),
    }
}
