// Error handling for the resource controllers
// Every handler outside the auth module returns Result<T, ApiError>.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::{debug, error, warn};

/// Error taxonomy for catalog, user-management, review and order operations
///
/// Each variant maps to one HTTP status; bodies are always `{"message": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message; internal detail never leaks into responses
    fn client_message(&self) -> String {
        match self {
            ApiError::Database(_) => "Internal server error".to_string(),
            ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Validation(msg) => debug!("Validation error: {}", msg),
            ApiError::NotFound { resource } => debug!("{} not found", resource),
            ApiError::Unauthorized(msg) => warn!("Unauthorized request: {}", msg),
            ApiError::Forbidden(msg) => warn!("Forbidden request: {}", msg),
            ApiError::Conflict(msg) => warn!("Conflict: {}", msg),
            ApiError::Database(err) => error!("Database error: {:?}", err),
            ApiError::Internal(msg) => error!("Internal error: {}", msg),
        }

        let status = self.status_code();
        let body = Json(json!({ "message": self.client_message() }));
        (status, body).into_response()
    }
}

/// Convert validator errors to the validation variant
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}

impl From<crate::validation::MissingField> for ApiError {
    fn from(err: crate::validation::MissingField) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<crate::auth::AuthError> for ApiError {
    fn from(err: crate::auth::AuthError) -> Self {
        use crate::auth::AuthError;
        match err {
            AuthError::ValidationError(msg) => ApiError::Validation(msg),
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::MissingRefreshCookie => ApiError::Unauthorized(err_text(&err)),
            AuthError::InvalidToken | AuthError::ExpiredToken | AuthError::AdminRequired => {
                ApiError::Forbidden(err_text(&err))
            }
            AuthError::EmailAlreadyExists => ApiError::Conflict("Email already exists".to_string()),
            AuthError::UserNotFound => ApiError::NotFound { resource: "User" },
            AuthError::PasswordHash | AuthError::TokenCreation(_) | AuthError::Database(_) => {
                ApiError::Internal(err_text(&err))
            }
        }
    }
}

fn err_text(err: &crate::auth::AuthError) -> String {
    err.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_match_taxonomy() {
        assert_eq!(
            ApiError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound { resource: "Product" }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let err = ApiError::Internal("connection refused on 10.0.0.3".into());
        assert_eq!(err.client_message(), "Internal server error");
    }
}
