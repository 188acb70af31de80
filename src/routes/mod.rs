pub mod health;
pub mod playlist;

use axum::{http::StatusCode, Json};

use crate::errors::CatalogError;

/// Error response used by every handler: status plus `{ "error": message }`
pub type ApiError = (StatusCode, Json<serde_json::Value>);

/// Map a catalog error to its HTTP response
pub fn api_error(err: CatalogError) -> ApiError {
    let status = match &err {
        CatalogError::EmptyPlaylist
        | CatalogError::InvalidFile(_)
        | CatalogError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        CatalogError::CategoryNotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::Unreachable(_) => StatusCode::BAD_GATEWAY,
        CatalogError::Store(e) => {
            tracing::error!("Store failure: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(serde_json::json!({ "error": err.to_string() })))
}
