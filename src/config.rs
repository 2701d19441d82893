// Application configuration
// All runtime settings are read once at startup and passed down explicitly;
// no module reads the environment on its own.

use std::env;

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Default number of products per catalog page
    pub page_size: u32,
    /// Origins allowed by the CORS layer (credentials are enabled, so the
    /// list must be explicit rather than a wildcard)
    pub allowed_origins: Vec<String>,
    pub jwt: JwtConfig,
    /// Optional admin account created once at startup
    pub seed_admin: Option<SeedAdmin>,
}

/// Token signing configuration
///
/// Access and refresh tokens are signed with distinct secrets so a leaked
/// access secret cannot mint refresh tokens.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl_secs: i64,
    pub refresh_ttl_secs: i64,
}

/// Credentials for the one-shot admin seeding routine
#[derive(Debug, Clone)]
pub struct SeedAdmin {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Configuration errors surfaced at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidVar(&'static str, String),
}

impl AppConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = required("DATABASE_URL")?;
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_or("PORT", 8080)?;
        let page_size = parse_or("PAGINATION_LIMIT", 8)?;

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let jwt = JwtConfig {
            access_secret: required("ACCESS_TOKEN_SECRET")?,
            refresh_secret: required("REFRESH_TOKEN_SECRET")?,
            access_ttl_secs: parse_or("ACCESS_TOKEN_TTL_SECS", 900)?,
            refresh_ttl_secs: parse_or("REFRESH_TOKEN_TTL_SECS", 604_800)?,
        };

        // Seeding is opt-in: all three variables must be present.
        let seed_admin = match (
            env::var("SEED_ADMIN_NAME"),
            env::var("SEED_ADMIN_EMAIL"),
            env::var("SEED_ADMIN_PASSWORD"),
        ) {
            (Ok(name), Ok(email), Ok(password)) => Some(SeedAdmin {
                name,
                email,
                password,
            }),
            _ => None,
        };

        Ok(Self {
            database_url,
            host,
            port,
            page_size,
            allowed_origins,
            jwt,
            seed_admin,
        })
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidVar(name, raw)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_uses_default_when_unset() {
        std::env::remove_var("ESTORE_TEST_UNSET");
        let value: u16 = parse_or("ESTORE_TEST_UNSET", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_or_rejects_garbage() {
        std::env::set_var("ESTORE_TEST_GARBAGE", "not-a-number");
        let result: Result<u16, _> = parse_or("ESTORE_TEST_GARBAGE", 1);
        assert!(result.is_err());
        std::env::remove_var("ESTORE_TEST_GARBAGE");
    }
}
