pub mod api;
pub mod sections;
pub mod upload;

use rocket::http::Status;
use rocket::serde::json::Json;
use serde_json::{json, Value};

use crate::repository::RepositoryError;
use crate::store::StoreError;

pub type ApiError = (Status, Json<Value>);

pub fn api_error(status: Status, message: &str) -> ApiError {
    (status, Json(json!({ "error": message })))
}

/// Map repository failures onto HTTP statuses. Quota errors are 507.
pub fn repository_error(e: RepositoryError) -> ApiError {
    let status = match &e {
        RepositoryError::DuplicateId(_) => Status::Conflict,
        RepositoryError::NotFound(_) => Status::NotFound,
        RepositoryError::Store(StoreError::QuotaExceeded { .. }) => Status::InsufficientStorage,
        RepositoryError::Store(StoreError::Unavailable(_)) | RepositoryError::Serialize(_) => {
            log::error!("content write failed: {}", e);
            Status::InternalServerError
        }
    };
    api_error(status, &e.to_string())
}
