use actix_web::{HttpRequest, HttpResponse, Responder, get};
use serde_json::json;

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "message": "API is running smoothly",
    }))
}

/// Fallback handler for unknown routes.
pub async fn not_found(req: HttpRequest) -> impl Responder {
    HttpResponse::NotFound().json(json!({
        "message": "Route not found",
        "path": req.path(),
    }))
}
