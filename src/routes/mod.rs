//! HTTP routes of the hospital API.

use actix_web::HttpResponse;

use crate::dto::api::ErrorBody;
use crate::services::ServiceError;

pub mod api;

/// Maps a service failure onto its HTTP status and JSON error body.
pub fn service_error_response(err: &ServiceError) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            HttpResponse::Forbidden().json(ErrorBody::new("insufficient role"))
        }
        ServiceError::NotFound => HttpResponse::NotFound().json(ErrorBody::new("not found")),
        ServiceError::Query(err) => HttpResponse::BadRequest().json(ErrorBody::new(err.to_string())),
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            HttpResponse::BadRequest().json(ErrorBody::new(message.clone()))
        }
        ServiceError::Conflict(message) => {
            HttpResponse::Conflict().json(ErrorBody::new(message.clone()))
        }
        ServiceError::Repository(_) | ServiceError::Internal(_) => {
            log::error!("Request failed: {err}");
            HttpResponse::InternalServerError().json(ErrorBody::new("internal server error"))
        }
    }
}
