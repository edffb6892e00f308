use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;

use crate::config::ConfigError;
use crate::errors::{ApiError, InternalError};
use crate::types::internal::auth::{Claims, PrincipalKind, Role};

/// Session token lifetime in minutes.
const TOKEN_TTL_MINUTES: i64 = 60;

/// Issues and verifies signed, time-bound session tokens.
///
/// The signing secret is injected at construction and validated there, so a
/// missing secret fails the process at startup rather than surfacing as a
/// per-request failure. Tokens are verifiable by any process holding the
/// same secret; nothing is persisted server-side.
pub struct TokenService {
    jwt_secret: String,
    expiration_minutes: i64,
}

impl TokenService {
    /// Create a new TokenService with the given signing secret.
    ///
    /// # Returns
    /// * `Err(ConfigError::MissingJwtSecret)` if the secret is empty
    pub fn new(jwt_secret: String) -> Result<Self, ConfigError> {
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingJwtSecret);
        }
        Ok(Self {
            jwt_secret,
            expiration_minutes: TOKEN_TTL_MINUTES,
        })
    }

    /// Issue a signed token for the given principal.
    ///
    /// Encodes `{sub, kind, roles}` plus issue/expiry timestamps and signs
    /// with HS256. Pure function of the secret and its inputs.
    pub fn issue(
        &self,
        principal_id: i32,
        kind: PrincipalKind,
        roles: Vec<Role>,
    ) -> Result<String, InternalError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: principal_id,
            kind,
            roles,
            iat: now,
            exp: now + self.expiration_minutes * 60,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| InternalError::TokenEncoding(e.to_string()))
    }

    /// Verify signature integrity and expiry, returning the decoded claims.
    ///
    /// Does not re-check the credential store: roles and status are as of
    /// issuance time.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => ApiError::expired_token(),
            _ => ApiError::invalid_token(),
        })
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("jwt_secret", &"<redacted>")
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}
