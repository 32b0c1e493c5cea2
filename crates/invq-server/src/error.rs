//! HTTP-facing error type.

use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use invq_core::{ExtractionError, FieldError};
use invq_datastore::DatastoreError;

/// Errors returned by request handlers.
///
/// Every variant is reported as `{"detail": "<message>"}`. Processing
/// failures answer 500 with their message unchanged; malformed requests keep
/// the status the body parser chose.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Datastore(#[from] DatastoreError),

    #[error("{}", .0.body_text())]
    Rejection(#[from] JsonRejection),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Rejection(rejection) => rejection.status(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

/// `Json` extractor whose rejections use the `{"detail": ...}` shape.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_errors_are_500() {
        let err = ApiError::from(ExtractionError::Other("fetch timed out".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "fetch timed out");
    }

    #[test]
    fn test_field_error_message_passes_through() {
        let err = ApiError::from(FieldError::NotANumber {
            field: "total_amount".to_string(),
            value: "[]".to_string(),
        });
        assert_eq!(err.to_string(), "could not convert total_amount to a number: []");
    }
}
