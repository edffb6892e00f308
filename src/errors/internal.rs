use thiserror::Error;

/// Internal error type for store and service operations.
///
/// This error type is NOT exposed via API. API endpoints must explicitly
/// convert these to AuthError or ApiError.
#[derive(Error, Debug)]
pub enum InternalError {
    /// Database query or operation failed
    #[error("Database error: {operation} failed: {source}")]
    Database {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    /// Cryptographic operation failed (hashing, verification)
    #[error("Crypto error: {operation} failed: {message}")]
    Crypto { operation: String, message: String },

    /// Failed to parse a stored value (role JSON, etc.)
    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },

    /// Requested resource does not exist
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    /// Registration attempted with an email that is already taken
    #[error("User exists with the email")]
    DuplicateEmail,

    /// Login attempted with an email no principal is registered under
    #[error("Wrong email!")]
    UnknownEmail,

    /// Login attempted with a password that does not match the stored digest
    #[error("Invalid login credential")]
    InvalidCredentials,

    /// Login attempted against a suspended account
    #[error("Your account has been suspended")]
    AccountSuspended,

    /// Token signing failed
    #[error("Token encoding failed: {0}")]
    TokenEncoding(String),
}

impl InternalError {
    pub fn database(operation: impl Into<String>, source: sea_orm::DbErr) -> Self {
        Self::Database {
            operation: operation.into(),
            source,
        }
    }

    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }
}
