// HTTP handlers for the session endpoints
// The refresh token only ever travels inside the HTTP-only `jwt` cookie;
// response bodies carry the access token alone.

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::{json, Value};

use crate::auth::{
    error::AuthError,
    models::{AccessTokenResponse, AuthResponse, LoginRequest, RegisterRequest},
    REFRESH_COOKIE,
};
use crate::AppState;

/// POST /api/users/register
pub async fn register_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>), AuthError> {
    let session = state.auth_service.register(request).await?;
    let jar = jar.add(refresh_cookie(
        session.refresh_token,
        state.tokens.refresh_ttl_secs(),
    ));
    Ok((StatusCode::CREATED, jar, Json(session.body)))
}

/// POST /api/users/login
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AuthError> {
    let session = state.auth_service.login(request).await?;
    let jar = jar.add(refresh_cookie(
        session.refresh_token,
        state.tokens.refresh_ttl_secs(),
    ));
    Ok((jar, Json(session.body)))
}

/// GET /api/users/refresh
///
/// 401 without a cookie, 403 when the cookie fails verification, 404 when
/// the identity behind a valid cookie no longer exists.
pub async fn refresh_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<AccessTokenResponse>, AuthError> {
    let cookie = jar
        .get(REFRESH_COOKIE)
        .ok_or(AuthError::MissingRefreshCookie)?;

    let response = state.auth_service.refresh(cookie.value()).await?;
    Ok(Json(response))
}

/// POST /api/users/logout
pub async fn logout_handler(jar: CookieJar) -> Result<(CookieJar, Json<Value>), AuthError> {
    if jar.get(REFRESH_COOKIE).is_none() {
        return Err(AuthError::MissingRefreshCookie);
    }

    let jar = jar.remove(Cookie::build(REFRESH_COOKIE).path("/").build());
    Ok((jar, Json(json!({ "message": "Logged out successfully" }))))
}

/// Build the refresh-token cookie with the original's attributes:
/// HTTP-only, Secure, SameSite=None, lifetime matching the token expiry.
fn refresh_cookie(token: String, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(time::Duration::seconds(max_age_secs))
        .build()
}
