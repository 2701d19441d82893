// User management module
// Self-service profile operations plus the admin-facing user CRUD.

pub mod handlers;
pub mod models;
pub mod service;

pub use models::{AdminUpdateUserRequest, ProfileResponse, UpdateProfileRequest};
pub use service::UserService;
