// User management DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Self-service profile update; absent fields keep their stored values
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    #[validate(email(message = "Email must be a valid address"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

/// Admin edit of another user; absent fields keep their stored values
#[derive(Debug, Deserialize, Validate)]
pub struct AdminUpdateUserRequest {
    pub name: Option<String>,
    #[validate(email(message = "Email must be a valid address"))]
    pub email: Option<String>,
    pub is_admin: Option<bool>,
}

/// Profile update response; includes a fresh access token because the
/// claim's name may have changed.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub access_token: String,
}
