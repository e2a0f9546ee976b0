//! Unified service-layer error type for alta-server
//!
//! `ServiceError` bridges storage errors (`StoreError`) and the API-layer
//! error (`AppError`), so handlers can use `?` on repository calls.

use crate::store::StoreError;
use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

/// Service-layer error
///
/// - `Store`: storage errors (logged, mapped to DatabaseError, NotFound to 404)
/// - `App`: business-rule errors (passed through to the client)
#[derive(Debug)]
pub enum ServiceError {
    Store(StoreError),
    App(AppError),
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        ServiceError::Store(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { collection, id } => {
                AppError::not_found(format!("{collection}/{id}"))
            }
            StoreError::Codec(err) => {
                tracing::error!(error = %err, "Stored document could not be decoded");
                AppError::new(ErrorCode::StorageCorrupted)
            }
            StoreError::Backend(msg) => {
                tracing::error!(error = %msg, "Storage backend error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Store(store_err) => store_err.into(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err: AppError = ServiceError::from(StoreError::not_found("sales", "s1")).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.http_status(), http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_backend_error_hides_details() {
        let err: AppError = StoreError::Backend("disk I/O error".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("disk"));
    }

    #[test]
    fn test_app_error_passes_through() {
        let err: AppError = ServiceError::from(AppError::validation("bad")).into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "bad");
    }
}
