//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::EventId;
use crate::storage::StorageError;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "Event not found"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`ApiError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status                   |
/// |-----------|------------|-------------------------------|
/// | 1000–1999 | Validation | 400 Bad Request               |
/// | 2000–2999 | Not Found  | 404 Not Found                 |
/// | 3000–3999 | Server     | 500 / 503                     |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Title, host name, start date or end date is missing or blank.
    #[error("Mandatory fields are missing.")]
    MissingMandatoryFields,

    /// A field or the request body could not be decoded.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The event would end before it starts.
    #[error("event end date {end} is before start date {start}")]
    InvalidDateRange {
        /// Requested first day.
        start: NaiveDate,
        /// Requested last day.
        end: NaiveDate,
    },

    /// Event with the given id was not found.
    #[error("Event not found")]
    EventNotFound(EventId),

    /// Database failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Writing to the object store failed.
    #[error("upload failed: {0}")]
    UploadFailed(String),

    /// The object store could not be initialized at startup.
    #[error("object storage service not available")]
    StorageUnavailable,

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::MissingMandatoryFields => 1001,
            Self::InvalidRequest(_) => 1002,
            Self::InvalidDateRange { .. } => 1003,
            Self::EventNotFound(_) => 2001,
            Self::Internal(_) => 3000,
            Self::Persistence(_) => 3001,
            Self::UploadFailed(_) => 3002,
            Self::StorageUnavailable => 3003,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingMandatoryFields
            | Self::InvalidRequest(_)
            | Self::InvalidDateRange { .. } => StatusCode::BAD_REQUEST,
            Self::EventNotFound(_) => StatusCode::NOT_FOUND,
            Self::Persistence(_) | Self::UploadFailed(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Returns the message shown to clients.
    ///
    /// Server-side failures get a generic message; their details are only
    /// logged.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Persistence(_) | Self::Internal(_) => {
                "An unexpected error occurred.".to_string()
            }
            Self::UploadFailed(_) => "Could not upload file to object storage.".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Unavailable | StorageError::BucketMissing => Self::StorageUnavailable,
            StorageError::Bucket(e) => Self::UploadFailed(e),
            StorageError::Backend(e) => Self::UploadFailed(e.to_string()),
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for ApiError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        Self::InvalidRequest(err.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.public_message(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_bad_request() {
        assert_eq!(
            ApiError::MissingMandatoryFields.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidRequest("bad date".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::EventNotFound(EventId::new(9));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), 2001);
    }

    #[test]
    fn unavailable_storage_maps_to_503() {
        let err = ApiError::from(StorageError::Unavailable);
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        let err = ApiError::from(StorageError::BucketMissing);
        assert_eq!(err.error_code(), 3003);
    }

    #[test]
    fn server_errors_hide_details() {
        let err = ApiError::Persistence("connection refused to 10.0.0.5".into());
        assert_eq!(err.public_message(), "An unexpected error occurred.");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
