// Authentication service - business logic layer

use std::sync::Arc;

use validator::Validate;

use crate::auth::{
    error::AuthError,
    models::{AccessTokenResponse, AuthResponse, LoginRequest, RegisterRequest, User},
    password::PasswordService,
    repository::UserRepository,
    token::TokenService,
};
use crate::validation::require_text;

/// Coordinates registration, login and the refresh/logout session flow
pub struct AuthService {
    users: UserRepository,
    tokens: Arc<TokenService>,
}

/// Result of an operation that establishes a session: the response body
/// plus the refresh token destined for the cookie.
pub struct SessionTokens {
    pub body: AuthResponse,
    pub refresh_token: String,
}

impl AuthService {
    pub fn new(users: UserRepository, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Register a new user and open a session
    pub async fn register(&self, request: RegisterRequest) -> Result<SessionTokens, AuthError> {
        request
            .validate()
            .map_err(|e| AuthError::ValidationError(e.to_string()))?;

        let name = require_text(request.name, "name")
            .map_err(|e| AuthError::ValidationError(e.to_string()))?;
        let email = require_text(request.email, "email")
            .map_err(|e| AuthError::ValidationError(e.to_string()))?;
        let password = require_text(request.password, "password")
            .map_err(|e| AuthError::ValidationError(e.to_string()))?;

        // Pre-check for a friendly error; the unique index still catches
        // a racing registration and maps to the same conflict.
        if self.users.email_exists(&email).await? {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = PasswordService::hash_password(&password)?;
        let user = self
            .users
            .create_user(&name, &email, &password_hash, false)
            .await?;

        tracing::info!(user_id = %user.id, "Registered new user");
        self.open_session(user)
    }

    /// Authenticate by email and password
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, request: LoginRequest) -> Result<SessionTokens, AuthError> {
        let email = require_text(request.email, "email")
            .map_err(|e| AuthError::ValidationError(e.to_string()))?;
        let password = require_text(request.password, "password")
            .map_err(|e| AuthError::ValidationError(e.to_string()))?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !PasswordService::verify_password(&password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "User logged in");
        self.open_session(user)
    }

    /// Mint a new access token from a refresh-token cookie value
    ///
    /// The identity is re-read from the credential store so a demoted or
    /// renamed user does not keep minting tokens from stale claims.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AccessTokenResponse, AuthError> {
        let claims = self.tokens.verify_refresh_token(refresh_token)?;

        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let access_token = self
            .tokens
            .issue_access_token(user.id, &user.name, user.is_admin)?;

        tracing::debug!(user_id = %user.id, "Issued refreshed access token");
        Ok(AccessTokenResponse { access_token })
    }

    fn open_session(&self, user: User) -> Result<SessionTokens, AuthError> {
        let access_token = self
            .tokens
            .issue_access_token(user.id, &user.name, user.is_admin)?;
        let refresh_token = self
            .tokens
            .issue_refresh_token(user.id, &user.name, user.is_admin)?;

        Ok(SessionTokens {
            body: AuthResponse {
                id: user.id,
                name: user.name,
                email: user.email,
                is_admin: user.is_admin,
                access_token,
            },
            refresh_token,
        })
    }
}
