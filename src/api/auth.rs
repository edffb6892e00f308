use poem_openapi::{payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::errors::auth::AuthError;
use crate::services::TokenService;
use crate::stores::{AdminStore, UserStore};
use crate::types::dto::auth::{LoginRequest, LoginResponse, RegisterRequest};
use crate::types::dto::common::MessageResponse;
use crate::types::internal::auth::PrincipalKind;

/// Authentication API endpoints for both principal kinds
pub struct AuthApi {
    users: Arc<UserStore>,
    admins: Arc<AdminStore>,
    tokens: Arc<TokenService>,
}

impl AuthApi {
    pub fn new(users: Arc<UserStore>, admins: Arc<AdminStore>, tokens: Arc<TokenService>) -> Self {
        Self {
            users,
            admins,
            tokens,
        }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// User registration and login
    UsersAuthentication,
    /// Admin login
    AdminAuthentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Register a new user account
    #[oai(
        path = "/users/register",
        method = "post",
        tag = "AuthTags::UsersAuthentication"
    )]
    pub async fn register(&self, body: Json<RegisterRequest>) -> Result<Json<MessageResponse>, AuthError> {
        self.users
            .add_user(&body.first_name, &body.last_name, &body.email, &body.password)
            .await?;

        Ok(Json(MessageResponse::ok("Registration successful")))
    }

    /// Login with email and password to receive a session token
    #[oai(
        path = "/users/login",
        method = "post",
        tag = "AuthTags::UsersAuthentication"
    )]
    pub async fn login(&self, body: Json<LoginRequest>) -> Result<Json<LoginResponse>, AuthError> {
        let user = self.users.verify_login(&body.email, &body.password).await?;

        // Users carry no elevated role; the token identifies them only.
        let access_token = self.tokens.issue(user.id, PrincipalKind::User, vec![])?;

        Ok(Json(LoginResponse {
            success: true,
            message: "Login successful".to_string(),
            access_token,
        }))
    }

    /// Admin login
    #[oai(
        path = "/admins/login",
        method = "post",
        tag = "AuthTags::AdminAuthentication"
    )]
    pub async fn admin_login(&self, body: Json<LoginRequest>) -> Result<Json<LoginResponse>, AuthError> {
        let (admin, roles) = self.admins.verify_login(&body.email, &body.password).await?;

        let access_token = self.tokens.issue(admin.id, PrincipalKind::Admin, roles)?;

        Ok(Json(LoginResponse {
            success: true,
            message: "Login successful".to_string(),
            access_token,
        }))
    }
}
