// Request extractors gating protected routes
//
// `AuthenticatedUser` is the authentication layer: it resolves the bearer
// token into a verified identity without touching the credential store.
// `AdminUser` is the authorization layer on top of it: a pure predicate
// over the claim's admin flag.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crate::auth::error::AuthError;
use crate::AppState;

/// Identity resolved from a verified access token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub name: String,
    pub is_admin: bool,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // An absent or non-Bearer header is a missing credential (401);
        // only a token that fails verification yields 403.
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::MissingToken)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::MissingToken)?;

        let claims = state.tokens.verify_access_token(token)?;

        Ok(AuthenticatedUser {
            id: claims.sub,
            name: claims.name,
            is_admin: claims.is_admin,
        })
    }
}

/// Identity that additionally holds the admin flag
///
/// Extraction runs the full authentication step first, so a missing token
/// still surfaces as 401 and only a valid-but-unprivileged one as 403.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            tracing::warn!(user_id = %user.id, "Non-admin request to admin route");
            return Err(AuthError::AdminRequired);
        }
        Ok(AdminUser(user))
    }
}
