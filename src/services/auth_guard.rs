use poem::http::HeaderMap;
use std::sync::Arc;

use crate::errors::ApiError;
use crate::services::TokenService;
use crate::types::internal::auth::{AuthPrincipal, PrincipalKind, RolePolicy};

/// Gates route execution on valid authentication and role membership.
///
/// One guard serves both principal kinds; each route states the kind it
/// expects and the role policy it requires. On success the resolved
/// principal is handed back to the handler to scope its queries with.
pub struct AuthGuard {
    tokens: Arc<TokenService>,
}

impl AuthGuard {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Authenticate and authorize a request.
    ///
    /// 1. Extract the bearer token from the `Authorization` header
    /// 2. Verify signature and expiry
    /// 3. Require the expected principal kind
    /// 4. Evaluate the role policy against the token's role set
    ///
    /// # Returns
    /// * `Ok(AuthPrincipal)` - the verified identity
    /// * `Err(ApiError)` - 401 for missing/malformed/invalid/expired
    ///   tokens, 403 for a kind mismatch or an unsatisfied policy
    pub fn authorize(
        &self,
        headers: &HeaderMap,
        expected: PrincipalKind,
        policy: &RolePolicy,
    ) -> Result<AuthPrincipal, ApiError> {
        let token = Self::bearer_token(headers)?;
        let claims = self.tokens.verify(token)?;

        if claims.kind != expected {
            return Err(ApiError::forbidden());
        }
        if !policy.admits(&claims.roles) {
            return Err(ApiError::forbidden());
        }

        Ok(AuthPrincipal {
            id: claims.sub,
            kind: claims.kind,
            roles: claims.roles,
        })
    }

    fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
        let header = headers
            .get("authorization")
            .ok_or_else(ApiError::missing_auth_header)?
            .to_str()
            .map_err(|_| ApiError::invalid_auth_header())?;

        header
            .strip_prefix("Bearer ")
            .ok_or_else(ApiError::invalid_auth_header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::internal::auth::Role;

    fn guard() -> (AuthGuard, Arc<TokenService>) {
        let tokens = Arc::new(
            TokenService::new("test-secret-key-minimum-32-characters-long".to_string()).unwrap(),
        );
        (AuthGuard::new(tokens.clone()), tokens)
    }

    fn headers_with(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", format!("Bearer {}", token).parse().unwrap());
        headers
    }

    #[test]
    fn test_missing_authorization_header_is_unauthenticated() {
        let (guard, _) = guard();
        let headers = HeaderMap::new();

        let result = guard.authorize(&headers, PrincipalKind::User, &RolePolicy::authenticated());

        assert!(matches!(result, Err(ApiError::MissingAuthHeader(_))));
    }

    #[test]
    fn test_header_without_bearer_prefix_is_unauthenticated() {
        let (guard, tokens) = guard();
        let token = tokens.issue(1, PrincipalKind::User, vec![]).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert("authorization", token.parse().unwrap());

        let result = guard.authorize(&headers, PrincipalKind::User, &RolePolicy::authenticated());

        assert!(matches!(result, Err(ApiError::InvalidAuthHeader(_))));
    }

    #[test]
    fn test_invalid_token_is_unauthenticated() {
        let (guard, _) = guard();
        let headers = headers_with("invalid-jwt-token");

        let result = guard.authorize(&headers, PrincipalKind::User, &RolePolicy::authenticated());

        assert!(matches!(result, Err(ApiError::InvalidToken(_))));
    }

    #[test]
    fn test_valid_user_token_resolves_principal() {
        let (guard, tokens) = guard();
        let token = tokens.issue(17, PrincipalKind::User, vec![]).unwrap();
        let headers = headers_with(&token);

        let principal = guard
            .authorize(&headers, PrincipalKind::User, &RolePolicy::authenticated())
            .unwrap();

        assert_eq!(principal.id, 17);
        assert_eq!(principal.kind, PrincipalKind::User);
        assert!(principal.roles.is_empty());
    }

    #[test]
    fn test_user_token_on_admin_route_is_forbidden() {
        let (guard, tokens) = guard();
        let token = tokens.issue(17, PrincipalKind::User, vec![]).unwrap();
        let headers = headers_with(&token);

        let result = guard.authorize(
            &headers,
            PrincipalKind::Admin,
            &RolePolicy::authenticated(),
        );

        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    #[test]
    fn test_admin_policy_rejects_token_with_only_user_role() {
        let (guard, tokens) = guard();
        let token = tokens
            .issue(3, PrincipalKind::Admin, vec![Role::User])
            .unwrap();
        let headers = headers_with(&token);

        let result = guard.authorize(
            &headers,
            PrincipalKind::Admin,
            &RolePolicy::allow([Role::Admin]),
        );

        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    #[test]
    fn test_admin_policy_admits_admin_role() {
        let (guard, tokens) = guard();
        let token = tokens
            .issue(3, PrincipalKind::Admin, vec![Role::Admin])
            .unwrap();
        let headers = headers_with(&token);

        let principal = guard
            .authorize(
                &headers,
                PrincipalKind::Admin,
                &RolePolicy::allow([Role::Admin]),
            )
            .unwrap();

        assert_eq!(principal.roles, vec![Role::Admin]);
    }

    #[test]
    fn test_admin_policy_admits_admin_super_admin_combination() {
        let (guard, tokens) = guard();
        let token = tokens
            .issue(3, PrincipalKind::Admin, vec![Role::Admin, Role::SuperAdmin])
            .unwrap();
        let headers = headers_with(&token);

        let result = guard.authorize(
            &headers,
            PrincipalKind::Admin,
            &RolePolicy::allow([Role::Admin]),
        );

        assert!(result.is_ok());
    }
}
