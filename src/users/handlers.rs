// HTTP handlers for profile and user administration

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::middleware::{AdminUser, AuthenticatedUser};
use crate::auth::models::UserResponse;
use crate::error::ApiError;
use crate::users::models::{AdminUpdateUserRequest, ProfileResponse, UpdateProfileRequest};
use crate::AppState;

/// GET /api/users/profile
pub async fn get_profile_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<UserResponse>, ApiError> {
    let profile = state.user_service.get_profile(user.id).await?;
    Ok(Json(profile))
}

/// PUT /api/users/profile
pub async fn update_profile_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state.user_service.update_profile(user.id, request).await?;
    Ok(Json(profile))
}

/// GET /api/users (admin)
pub async fn list_users_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users))
}

/// GET /api/users/:id (admin)
pub async fn get_user_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(user))
}

/// PUT /api/users/:id (admin)
pub async fn update_user_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(request): Json<AdminUpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.user_service.update_user(id, request).await?;
    Ok(Json(user))
}

/// DELETE /api/users/:id (admin)
pub async fn delete_user_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    state.user_service.delete_user(id).await?;
    Ok(Json(json!({ "message": "User deleted successfully" })))
}
