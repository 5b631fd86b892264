use actix_web::HttpResponse;
use serde::Serialize;
use serde_json::Value;

use crate::pagination::PageInfo;
use crate::services::ServiceError;

pub mod categories;
pub mod exports;
pub mod favorites;
pub mod main;
pub mod products;
pub mod tags;

/// Uniform JSON envelope returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    /// Human-readable outcome, `"success"` on plain reads.
    pub message: String,
    /// Endpoint payload, `null` when there is nothing to return.
    pub response: Value,
    /// Page descriptor, present only on paginated listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageInfo>,
}

impl ApiResponse {
    /// Wrap a serializable payload under `message`.
    pub fn new(message: impl Into<String>, response: impl Serialize) -> Self {
        Self {
            message: message.into(),
            response: serde_json::to_value(response).unwrap_or(Value::Null),
            pagination: None,
        }
    }

    /// Envelope with a `null` payload.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            response: Value::Null,
            pagination: None,
        }
    }

    /// Attach a pagination block to the envelope.
    pub fn with_pagination(mut self, pagination: PageInfo) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

/// Parses a path segment as a record identifier.
fn parse_id(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

fn invalid_id_response() -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::message_only("Invalid ID"))
}

/// Maps a service error onto the wire envelope. Internal failures are logged
/// under `context` and redacted in the body.
fn error_response(err: ServiceError, context: &str) -> HttpResponse {
    match err {
        ServiceError::Form(message) | ServiceError::Conflict(message) => {
            HttpResponse::BadRequest().json(ApiResponse::message_only(message))
        }
        ServiceError::NotFound(message) => {
            HttpResponse::NotFound().json(ApiResponse::message_only(message))
        }
        ServiceError::Unprocessable(message) => {
            HttpResponse::UnprocessableEntity().json(ApiResponse::message_only(message))
        }
        err => {
            log::error!("{context}: {err}");
            HttpResponse::InternalServerError()
                .json(ApiResponse::message_only("Internal server error"))
        }
    }
}
