// User management service

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::auth::{
    models::{User, UserResponse},
    password::PasswordService,
    repository::{UserChanges, UserRepository},
    token::TokenService,
};
use crate::error::ApiError;
use crate::users::models::{AdminUpdateUserRequest, ProfileResponse, UpdateProfileRequest};

pub struct UserService {
    users: UserRepository,
    tokens: Arc<TokenService>,
}

impl UserService {
    pub fn new(users: UserRepository, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Current user's profile
    pub async fn get_profile(&self, user_id: Uuid) -> Result<UserResponse, ApiError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::NotFound { resource: "User" })?;

        Ok(user.into())
    }

    /// Update the current user's profile; a supplied password is re-hashed
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<ProfileResponse, ApiError> {
        request.validate()?;

        let password_hash = match request.password {
            Some(password) => Some(PasswordService::hash_password(&password)?),
            None => None,
        };

        let changes = UserChanges {
            name: request.name,
            email: request.email,
            password_hash,
            is_admin: None,
        };

        let user = self
            .users
            .update_user(user_id, changes)
            .await?
            .ok_or(ApiError::NotFound { resource: "User" })?;

        // The name claim may have changed; hand back a token that matches.
        let access_token = self
            .tokens
            .issue_access_token(user.id, &user.name, user.is_admin)?;

        tracing::info!(user_id = %user.id, "Profile updated");
        Ok(ProfileResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            is_admin: user.is_admin,
            access_token,
        })
    }

    /// All users (admin)
    pub async fn list_users(&self) -> Result<Vec<UserResponse>, ApiError> {
        let users = self.users.list_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Single user by id (admin)
    pub async fn get_user(&self, id: Uuid) -> Result<UserResponse, ApiError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound { resource: "User" })?;

        Ok(user.into())
    }

    /// Admin edit of a user
    pub async fn update_user(
        &self,
        id: Uuid,
        request: AdminUpdateUserRequest,
    ) -> Result<UserResponse, ApiError> {
        request.validate()?;

        let changes = UserChanges {
            name: request.name,
            email: request.email,
            password_hash: None,
            is_admin: request.is_admin,
        };

        let user = self
            .users
            .update_user(id, changes)
            .await?
            .ok_or(ApiError::NotFound { resource: "User" })?;

        tracing::info!(user_id = %user.id, "User updated by admin");
        Ok(user.into())
    }

    /// Admin delete; admin accounts are never deletable through this path
    pub async fn delete_user(&self, id: Uuid) -> Result<(), ApiError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound { resource: "User" })?;

        ensure_deletable(&user)?;

        self.users.delete_user(id).await?;
        tracing::info!(user_id = %id, "User deleted by admin");
        Ok(())
    }
}

/// The admin-delete guard: refuse any target whose admin flag is set.
fn ensure_deletable(user: &User) -> Result<(), ApiError> {
    if user.is_admin {
        return Err(ApiError::Forbidden("Cannot delete admin user".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_user(is_admin: bool) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Joe Atef".to_string(),
            email: "joe@example.com".to_string(),
            password_hash: "hash".to_string(),
            is_admin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_admin_target_is_never_deletable() {
        let err = ensure_deletable(&sample_user(true)).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn test_regular_user_is_deletable() {
        assert!(ensure_deletable(&sample_user(false)).is_ok());
    }
}
