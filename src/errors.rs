//! Error types for the catalog service
//!
//! The parser and classifier never fail; only the empty-result condition and
//! I/O failures surface as errors.

use thiserror::Error;

/// Network retrieval errors
#[derive(Error, Debug)]
pub enum FetchError {
    /// Non-2xx response
    #[error("HTTP error: {0}")]
    Http(u16),
    /// Connection, timeout or body read failure
    #[error("Network error: {0}")]
    Network(String),
    /// Body larger than the configured limit
    #[error("Playlist too large: {size_mb:.1}MB (limit {limit_mb}MB)")]
    TooLarge { size_mb: f64, limit_mb: usize },
    /// URL that cannot be fetched at all
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FetchError::Http(status.as_u16()),
            None => FetchError::Network(err.to_string()),
        }
    }
}

/// Persistence errors from a playlist store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors surfaced by the ingestion and query boundary
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("No valid media entries found in playlist")]
    EmptyPlaylist,

    #[error("Could not load playlist from the given URL")]
    Unreachable(#[source] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid playlist file: {0}")]
    InvalidFile(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_unreachable_hides_cause_in_message() {
        let err = CatalogError::Unreachable(FetchError::Http(404));
        assert_eq!(err.to_string(), "Could not load playlist from the given URL");
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("HTTP error: 404"));
    }

    #[test]
    fn test_store_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CatalogError = StoreError::from(io).into();
        assert_eq!(err.to_string(), "Store I/O error: denied");
    }
}
