pub mod documents;
pub mod health;

pub use documents::{get_document, list_documents, random_document};
pub use health::{health_check, metrics_endpoint};

use axum::{http::StatusCode, response::Response};
use service_core::error::error_response;

pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

pub async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
