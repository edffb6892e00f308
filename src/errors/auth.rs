use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::internal::InternalError;
use crate::types::dto::common::ErrorResponse;

/// Error responses for the authentication endpoints (register/login)
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// No principal is registered under the given email
    #[oai(status = 404)]
    WrongEmail(Json<ErrorResponse>),

    /// Password does not match the stored digest
    #[oai(status = 400)]
    InvalidCredentials(Json<ErrorResponse>),

    /// Credentials are valid but the account is suspended
    #[oai(status = 403)]
    AccountSuspended(Json<ErrorResponse>),

    /// Email already registered
    #[oai(status = 409)]
    DuplicateEmail(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl AuthError {
    pub fn wrong_email() -> Self {
        AuthError::WrongEmail(Json(ErrorResponse {
            error: "wrong_email".to_string(),
            message: "Wrong email!".to_string(),
            status_code: 404,
        }))
    }

    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Json(ErrorResponse {
            error: "invalid_credentials".to_string(),
            message: "Invalid login credential".to_string(),
            status_code: 400,
        }))
    }

    pub fn account_suspended() -> Self {
        AuthError::AccountSuspended(Json(ErrorResponse {
            error: "account_suspended".to_string(),
            message: "Your account has been suspended".to_string(),
            status_code: 403,
        }))
    }

    pub fn duplicate_email() -> Self {
        AuthError::DuplicateEmail(Json(ErrorResponse {
            error: "duplicate_email".to_string(),
            message: "User exists with the email".to_string(),
            status_code: 409,
        }))
    }

    pub fn internal_error(message: String) -> Self {
        AuthError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message,
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AuthError::WrongEmail(json) => json.0.message.clone(),
            AuthError::InvalidCredentials(json) => json.0.message.clone(),
            AuthError::AccountSuspended(json) => json.0.message.clone(),
            AuthError::DuplicateEmail(json) => json.0.message.clone(),
            AuthError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl From<InternalError> for AuthError {
    fn from(err: InternalError) -> Self {
        match err {
            InternalError::UnknownEmail => AuthError::wrong_email(),
            InternalError::InvalidCredentials => AuthError::invalid_credentials(),
            InternalError::AccountSuspended => AuthError::account_suspended(),
            InternalError::DuplicateEmail => AuthError::duplicate_email(),
            other => {
                tracing::error!(error = %other, "auth operation failed");
                AuthError::internal_error(other.to_string())
            }
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
