// JWT token issuance and verification
// Two token kinds share one claim shape but are signed with distinct
// secrets: a short-lived access token carried as a bearer header and a
// long-lived refresh token carried only in an HTTP-only cookie.

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::error::AuthError;
use crate::config::JwtConfig;

/// Identity claim carried by both token kinds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub name: String,
    pub is_admin: bool,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
    /// Expiry timestamp (seconds)
    pub exp: i64,
}

/// Token service for issuing and verifying both token kinds
pub struct TokenService {
    access_secret: String,
    refresh_secret: String,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            access_secret: config.access_secret.clone(),
            refresh_secret: config.refresh_secret.clone(),
            access_ttl_secs: config.access_ttl_secs,
            refresh_ttl_secs: config.refresh_ttl_secs,
        }
    }

    /// Issue a short-lived access token
    pub fn issue_access_token(
        &self,
        user_id: Uuid,
        name: &str,
        is_admin: bool,
    ) -> Result<String, AuthError> {
        self.issue(user_id, name, is_admin, &self.access_secret, self.access_ttl_secs)
    }

    /// Issue a long-lived refresh token
    pub fn issue_refresh_token(
        &self,
        user_id: Uuid,
        name: &str,
        is_admin: bool,
    ) -> Result<String, AuthError> {
        self.issue(
            user_id,
            name,
            is_admin,
            &self.refresh_secret,
            self.refresh_ttl_secs,
        )
    }

    /// Verify an access token
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        Self::verify(token, &self.access_secret)
    }

    /// Verify a refresh token
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, AuthError> {
        Self::verify(token, &self.refresh_secret)
    }

    /// Refresh token lifetime, for the cookie Max-Age
    pub fn refresh_ttl_secs(&self) -> i64 {
        self.refresh_ttl_secs
    }

    fn issue(
        &self,
        user_id: Uuid,
        name: &str,
        is_admin: bool,
        secret: &str,
        ttl_secs: i64,
    ) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            name: name.to_string(),
            is_admin,
            iat: now,
            exp: now + ttl_secs,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenCreation(e.to_string()))
    }

    fn verify(token: &str, secret: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_service() -> TokenService {
        TokenService::new(&JwtConfig {
            access_secret: "access_secret_for_tests".to_string(),
            refresh_secret: "refresh_secret_for_tests".to_string(),
            access_ttl_secs: 900,
            refresh_ttl_secs: 604_800,
        })
    }

    #[test]
    fn test_access_token_expires_in_15_minutes() {
        let service = test_service();
        let token = service
            .issue_access_token(Uuid::new_v4(), "Joe", false)
            .unwrap();
        let claims = service.verify_access_token(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_refresh_token_expires_in_7_days() {
        let service = test_service();
        let token = service
            .issue_refresh_token(Uuid::new_v4(), "Joe", false)
            .unwrap();
        let claims = service.verify_refresh_token(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 604_800);
    }

    #[test]
    fn test_claims_carry_the_granted_identity() {
        let service = test_service();
        let id = Uuid::new_v4();

        let token = service.issue_access_token(id, "Magda", true).unwrap();
        let claims = service.verify_access_token(&token).unwrap();

        assert_eq!(claims.sub, id);
        assert_eq!(claims.name, "Magda");
        assert!(claims.is_admin);
    }

    #[test]
    fn test_access_and_refresh_secrets_are_not_interchangeable() {
        let service = test_service();
        let id = Uuid::new_v4();

        let access = service.issue_access_token(id, "Joe", false).unwrap();
        let refresh = service.issue_refresh_token(id, "Joe", false).unwrap();

        assert!(matches!(
            service.verify_refresh_token(&access),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            service.verify_access_token(&refresh),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_is_distinguished_from_invalid() {
        let service = test_service();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            name: "Joe".to_string(),
            is_admin: false,
            iat: now - 1000,
            exp: now - 500,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"access_secret_for_tests"),
        )
        .unwrap();

        assert!(matches!(
            service.verify_access_token(&token),
            Err(AuthError::ExpiredToken)
        ));
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let service = test_service();
        for garbage in ["", "not.a.token", "eyJhbGciOiJIUzI1NiJ9.broken.sig"] {
            assert!(matches!(
                service.verify_access_token(garbage),
                Err(AuthError::InvalidToken)
            ));
        }
    }

    proptest! {
        #[test]
        fn prop_claims_roundtrip(
            name in "[A-Za-z ]{1,30}",
            is_admin in proptest::bool::ANY,
        ) {
            let service = test_service();
            let id = Uuid::new_v4();
            let token = service.issue_access_token(id, &name, is_admin).unwrap();
            let claims = service.verify_access_token(&token).unwrap();
            prop_assert_eq!(claims.sub, id);
            prop_assert_eq!(claims.name, name);
            prop_assert_eq!(claims.is_admin, is_admin);
        }

        #[test]
        fn prop_random_strings_never_verify(garbage in "[a-zA-Z0-9]{10,60}") {
            let service = test_service();
            prop_assert!(service.verify_access_token(&garbage).is_err());
        }
    }
}
