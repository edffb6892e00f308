use poem_openapi::{Enum, Object};
use serde::{Deserialize, Serialize};

use crate::types::db::user;
use crate::types::dto::common::PageMeta;

/// Account status of a user principal
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    Pending,
    Approved,
    Suspended,
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UserStatus::Pending => "Pending",
            UserStatus::Approved => "Approved",
            UserStatus::Suspended => "Suspended",
        }
    }
}

/// User representation returned to admins. Password hashes never leave
/// the store layer.
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<user::Model> for UserDto {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Envelope for a paginated user listing
#[derive(Object, Debug)]
pub struct UserListResponse {
    pub success: bool,
    pub message: String,
    pub data: Vec<UserDto>,
    pub metadata: PageMeta,
}

/// Envelope for a single user
#[derive(Object, Debug)]
pub struct UserDetailResponse {
    pub success: bool,
    pub message: String,
    pub data: UserDto,
}
