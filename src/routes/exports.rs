use actix_web::http::header::ContentDisposition;
use actix_web::{HttpResponse, Responder, get, web};

use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::exports;

#[get("/export/products/csv")]
pub async fn export_products_csv(repo: web::Data<DieselRepository>) -> impl Responder {
    match exports::export_products_csv(repo.get_ref()) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv")
            .insert_header(ContentDisposition::attachment("products.csv"))
            .body(bytes),
        Err(err) => error_response(err, "Failed to export products"),
    }
}
