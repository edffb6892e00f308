use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::internal::InternalError;
use crate::types::dto::common::ErrorResponse;

/// Error responses for guarded resource endpoints.
///
/// The 401 variants map to the "unauthenticated" class of failures (missing,
/// malformed, invalid or expired token); 403 means the token was valid but
/// the principal is not allowed to proceed.
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Authorization header is missing
    #[oai(status = 401)]
    MissingAuthHeader(Json<ErrorResponse>),

    /// Authorization header format is invalid
    #[oai(status = 401)]
    InvalidAuthHeader(Json<ErrorResponse>),

    /// Invalid or malformed JWT
    #[oai(status = 401)]
    InvalidToken(Json<ErrorResponse>),

    /// JWT has expired
    #[oai(status = 401)]
    ExpiredToken(Json<ErrorResponse>),

    /// Valid token, insufficient role or wrong principal kind
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Resource does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl ApiError {
    pub fn missing_auth_header() -> Self {
        ApiError::MissingAuthHeader(Json(ErrorResponse {
            error: "missing_auth_header".to_string(),
            message: "Authorization header is required".to_string(),
            status_code: 401,
        }))
    }

    pub fn invalid_auth_header() -> Self {
        ApiError::InvalidAuthHeader(Json(ErrorResponse {
            error: "invalid_auth_header".to_string(),
            message: "Invalid Authorization header format".to_string(),
            status_code: 401,
        }))
    }

    pub fn invalid_token() -> Self {
        ApiError::InvalidToken(Json(ErrorResponse {
            error: "invalid_token".to_string(),
            message: "Invalid or malformed JWT".to_string(),
            status_code: 401,
        }))
    }

    pub fn expired_token() -> Self {
        ApiError::ExpiredToken(Json(ErrorResponse {
            error: "expired_token".to_string(),
            message: "JWT has expired".to_string(),
            status_code: 401,
        }))
    }

    pub fn forbidden() -> Self {
        ApiError::Forbidden(Json(ErrorResponse {
            error: "forbidden".to_string(),
            message: "You are not allowed to perform this action".to_string(),
            status_code: 403,
        }))
    }

    pub fn not_found(resource: &str) -> Self {
        ApiError::NotFound(Json(ErrorResponse {
            error: "not_found".to_string(),
            message: format!("{} not found", resource),
            status_code: 404,
        }))
    }

    pub fn internal_error(message: String) -> Self {
        ApiError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message,
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            ApiError::MissingAuthHeader(json) => json.0.message.clone(),
            ApiError::InvalidAuthHeader(json) => json.0.message.clone(),
            ApiError::InvalidToken(json) => json.0.message.clone(),
            ApiError::ExpiredToken(json) => json.0.message.clone(),
            ApiError::Forbidden(json) => json.0.message.clone(),
            ApiError::NotFound(json) => json.0.message.clone(),
            ApiError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        match err {
            InternalError::NotFound { resource } => ApiError::not_found(resource),
            other => {
                tracing::error!(error = %other, "request failed");
                ApiError::internal_error(other.to_string())
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
