use crate::auth::JwtConfig;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Server configuration
///
/// `LOG_LEVEL` and `LOG_DIR` are read earlier by [`crate::setup_environment`].
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | DATABASE_PATH | recipe.db | SQLite database file |
/// | HTTP_PORT | 8000 | HTTP port |
/// | ENVIRONMENT | development | development / staging / production |
/// | JWT_SECRET | random in development | signing secret, >= 32 chars |
/// | JWT_EXPIRATION_MINUTES | 1440 | token lifetime |
/// | JWT_ISSUER | recipe-server | token issuer |
/// | JWT_AUDIENCE | recipe-clients | token audience |
///
/// ```ignore
/// DATABASE_PATH=/data/recipe.db HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file path
    pub database_path: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from the environment
    pub fn from_env() -> AppResult<Self> {
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let jwt = JwtConfig::from_env(environment == "development")
            .map_err(|e| AppError::with_message(ErrorCode::ConfigError, e.to_string()))?;

        Ok(Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "recipe.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            jwt,
            environment,
        })
    }

    /// Configuration for tests and embedding: explicit database and secret
    pub fn with_overrides(database_path: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            database_path: database_path.into(),
            http_port: 0,
            jwt: JwtConfig::with_secret(jwt_secret),
            environment: "test".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_overrides() {
        let config = Config::with_overrides(":memory:", "x".repeat(40));
        assert_eq!(config.database_path, ":memory:");
        assert_eq!(config.jwt.secret.len(), 40);
        assert_eq!(config.environment, "test");
    }
}
