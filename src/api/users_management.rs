use poem::http::HeaderMap;
use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi, Tags,
};
use std::sync::Arc;

use crate::errors::ApiError;
use crate::services::{AuthGuard, PageRequest};
use crate::stores::{UserFilter, UserStore};
use crate::types::dto::common::MessageResponse;
use crate::types::dto::user::{UserDetailResponse, UserDto, UserListResponse, UserStatus};
use crate::types::internal::auth::{PrincipalKind, Role, RolePolicy};

/// Admin endpoints for user account moderation
pub struct UsersManagementApi {
    users: Arc<UserStore>,
    guard: Arc<AuthGuard>,
}

impl UsersManagementApi {
    pub fn new(users: Arc<UserStore>, guard: Arc<AuthGuard>) -> Self {
        Self { users, guard }
    }
}

/// API tags for admin user management
#[derive(Tags)]
enum AdminTags {
    /// User account moderation
    UsersManagement,
}

#[OpenApi(prefix_path = "/admin/users-management")]
impl UsersManagementApi {
    /// Admin fetches all users
    #[oai(path = "/users", method = "get", tag = "AdminTags::UsersManagement")]
    pub async fn view_all_users(
        &self,
        headers: &HeaderMap,
        #[oai(name = "searchTerm")] search_term: Query<Option<String>>,
        status: Query<Option<UserStatus>>,
        #[oai(validator(minimum(value = "1")))] page: Query<Option<u64>>,
        #[oai(validator(minimum(value = "1"), maximum(value = "500")))] limit: Query<Option<u64>>,
    ) -> Result<Json<UserListResponse>, ApiError> {
        self.guard.authorize(
            headers,
            PrincipalKind::Admin,
            &RolePolicy::allow([Role::Admin]),
        )?;

        let filter = UserFilter {
            search_term: search_term.0,
            status: status.0,
        };
        let result = self
            .users
            .get_all(&filter, PageRequest::new(page.0, limit.0))
            .await?;

        Ok(Json(UserListResponse {
            success: true,
            message: "Users fetched".to_string(),
            data: result.rows.into_iter().map(UserDto::from).collect(),
            metadata: result.metadata,
        }))
    }

    /// Admin fetches details of a user
    #[oai(path = "/users/:id", method = "get", tag = "AdminTags::UsersManagement")]
    pub async fn view_user(
        &self,
        headers: &HeaderMap,
        id: Path<i32>,
    ) -> Result<Json<UserDetailResponse>, ApiError> {
        self.guard.authorize(
            headers,
            PrincipalKind::Admin,
            &RolePolicy::allow([Role::Admin]),
        )?;

        let user = self
            .users
            .find_by_id(id.0)
            .await?
            .ok_or_else(|| ApiError::not_found("User"))?;

        Ok(Json(UserDetailResponse {
            success: true,
            message: "User details fetched".to_string(),
            data: UserDto::from(user),
        }))
    }

    /// Admin suspends a user account
    #[oai(
        path = "/users/:id/suspend",
        method = "patch",
        tag = "AdminTags::UsersManagement"
    )]
    pub async fn suspend_user(
        &self,
        headers: &HeaderMap,
        id: Path<i32>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        self.guard.authorize(
            headers,
            PrincipalKind::Admin,
            &RolePolicy::allow([Role::Admin]),
        )?;

        self.users.change_status(id.0, UserStatus::Suspended).await?;

        Ok(Json(MessageResponse::ok("User suspended")))
    }

    /// Admin removes a user suspension
    #[oai(
        path = "/users/:id/unsuspend",
        method = "patch",
        tag = "AdminTags::UsersManagement"
    )]
    pub async fn unsuspend_user(
        &self,
        headers: &HeaderMap,
        id: Path<i32>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        self.guard.authorize(
            headers,
            PrincipalKind::Admin,
            &RolePolicy::allow([Role::Admin]),
        )?;

        self.users.change_status(id.0, UserStatus::Approved).await?;

        Ok(Json(MessageResponse::ok("Suspension removed")))
    }

    /// Admin deletes a user account
    #[oai(path = "/users/:id", method = "delete", tag = "AdminTags::UsersManagement")]
    pub async fn delete_user_account(
        &self,
        headers: &HeaderMap,
        id: Path<i32>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        // Any admin role may delete accounts.
        self.guard
            .authorize(headers, PrincipalKind::Admin, &RolePolicy::any_role())?;

        self.users.delete(id.0).await?;

        Ok(Json(MessageResponse::ok("User deleted")))
    }
}
