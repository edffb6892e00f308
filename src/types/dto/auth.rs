use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Request model for user registration
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[oai(validator(min_length = 1))]
    pub first_name: String,

    #[oai(validator(min_length = 1))]
    pub last_name: String,

    #[oai(validator(min_length = 3))]
    pub email: String,

    #[oai(validator(min_length = 8))]
    pub password: String,
}

/// Request model for login (users and admins)
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response model containing the session token
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,

    /// Signed JWT proving principal identity
    pub access_token: String,
}
