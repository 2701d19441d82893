// Authentication error types
//
// Status mapping follows the middleware contract: a missing credential is
// 401, a credential that fails verification is 403.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::{error, warn};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    ValidationError(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Unauthorized")]
    MissingToken,

    #[error("Unauthorized")]
    MissingRefreshCookie,

    #[error("Not authorized as an admin")]
    AdminRequired,

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Password hashing error")]
    PasswordHash,

    #[error("Token creation error: {0}")]
    TokenCreation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl AuthError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::MissingRefreshCookie => StatusCode::UNAUTHORIZED,
            // Failed verification of a presented token is a 403, not a 401:
            // the caller supplied credentials, they just did not check out.
            AuthError::InvalidToken => StatusCode::FORBIDDEN,
            AuthError::ExpiredToken => StatusCode::FORBIDDEN,
            AuthError::AdminRequired => StatusCode::FORBIDDEN,
            AuthError::EmailAlreadyExists => StatusCode::CONFLICT,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::PasswordHash | AuthError::TokenCreation(_) | AuthError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match &self {
            AuthError::Database(msg) => {
                error!("Database error in auth: {}", msg);
                "Internal server error".to_string()
            }
            AuthError::PasswordHash => {
                error!("Password hashing failed");
                "Internal server error".to_string()
            }
            AuthError::TokenCreation(msg) => {
                error!("Token creation failed: {}", msg);
                "Internal server error".to_string()
            }
            AuthError::InvalidToken | AuthError::ExpiredToken => {
                warn!("Token verification failed: {}", self);
                "Forbidden".to_string()
            }
            AuthError::MissingToken | AuthError::MissingRefreshCookie => {
                warn!("Request without credentials");
                "Unauthorized".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({ "message": message }));
        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credentials_are_401() {
        assert_eq!(AuthError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::MissingRefreshCookie.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_failed_verification_is_403() {
        assert_eq!(AuthError::InvalidToken.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::ExpiredToken.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::AdminRequired.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_duplicate_email_is_conflict() {
        assert_eq!(
            AuthError::EmailAlreadyExists.status_code(),
            StatusCode::CONFLICT
        );
    }
}
