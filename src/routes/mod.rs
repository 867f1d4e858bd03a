use actix_web::HttpResponse;
use serde_json::json;

use crate::services::ServiceError;

pub mod bookings;
pub mod properties;

/// Translate a service failure into a JSON error response.
///
/// `action` describes what was attempted and only ends up in the server log.
pub(crate) fn error_response(err: ServiceError, action: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            HttpResponse::Unauthorized().json(json!({ "error": "unauthorized" }))
        }
        ServiceError::NotFound => HttpResponse::NotFound().json(json!({ "error": "not found" })),
        ServiceError::Conflict(message) => {
            HttpResponse::Conflict().json(json!({ "error": message }))
        }
        ServiceError::Form(message) => {
            HttpResponse::BadRequest().json(json!({ "error": message }))
        }
        ServiceError::Internal(message) => {
            log::error!("Failed to {action}: {message}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
