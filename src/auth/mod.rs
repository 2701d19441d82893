// Authentication module
// JWT access/refresh token issuance, argon2 credential storage, and the
// extractors that gate protected and admin-only routes.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

pub use error::AuthError;
pub use middleware::{AdminUser, AuthenticatedUser};
pub use models::{AuthResponse, LoginRequest, RegisterRequest, User, UserResponse};
pub use password::PasswordService;
pub use repository::UserRepository;
pub use service::AuthService;
pub use token::{Claims, TokenService};

/// Name of the HTTP-only cookie carrying the refresh token
pub const REFRESH_COOKIE: &str = "jwt";
