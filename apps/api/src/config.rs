//! Environment-driven configuration.
//!
//! Environment variables must be set by the runtime environment (compose
//! env_file, `--env-file`, or sourcing an env file in local dev).

use std::time::Duration;

use crate::auth::token::TokenConfig;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Application environment: development, staging, production, test
    pub env: String,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_secs(key: &str, default: u64) -> Result<Duration, AppError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| AppError::config(format!("{key} must be a number of seconds"))),
        Err(_) => Ok(Duration::from_secs(default)),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let port = env_or("PORT", "8080")
            .parse::<u16>()
            .map_err(|_| AppError::config("PORT must be a valid port number"))?;

        let config = Self {
            host: env_or("HOST", "0.0.0.0"),
            port,
            env: env_or("APP_ENV", "development"),
            database_url: std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            jwt_secret: env_or("JWT_SECRET", "change-me-in-production"),
            jwt_issuer: env_or("JWT_ISSUER", "svc-api"),
            access_ttl: env_secs("JWT_ACCESS_TTL_SECS", 3600)?,
            refresh_ttl: env_secs("JWT_REFRESH_TTL_SECS", 7 * 24 * 3600)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check required values; returns the first failure encountered.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.port == 0 {
            return Err(AppError::config("PORT must be between 1 and 65535"));
        }
        match self.env.as_str() {
            "development" | "staging" | "production" | "test" => {}
            other => {
                return Err(AppError::config(format!(
                    "APP_ENV must be one of development|staging|production|test, got {other:?}"
                )))
            }
        }
        if self.jwt_secret.trim().is_empty() {
            return Err(AppError::config("JWT_SECRET is required"));
        }
        if self.jwt_issuer.trim().is_empty() {
            return Err(AppError::config("JWT_ISSUER is required"));
        }
        if self.access_ttl.is_zero() {
            return Err(AppError::config("JWT_ACCESS_TTL_SECS must be > 0"));
        }
        if self.refresh_ttl.is_zero() {
            return Err(AppError::config("JWT_REFRESH_TTL_SECS must be > 0"));
        }
        if self.env == "production" && self.database_url.is_none() {
            return Err(AppError::config("DATABASE_URL is required in production"));
        }
        Ok(())
    }

    pub fn token_config(&self) -> TokenConfig {
        TokenConfig {
            secret: self.jwt_secret.as_bytes().to_vec(),
            access_ttl: self.access_ttl,
            refresh_ttl: self.refresh_ttl,
            issuer: self.jwt_issuer.clone(),
        }
    }
}
