//! Process configuration loaded from the environment.
//!
//! Everything is read once at startup and treated as immutable afterwards.

use anyhow::{Context, Result};
use chrono::Duration;
use jsonwebtoken::Algorithm;
use std::env;
use std::str::FromStr;

/// Token signing configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared secret for HMAC signing
    pub secret: String,
    /// Signing algorithm written into the token header
    pub algorithm: Algorithm,
    /// Default lifetime of access tokens
    pub access_token_ttl: Duration,
    /// Default lifetime of refresh tokens
    pub refresh_token_ttl: Duration,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: Algorithm::HS256,
            access_token_ttl: Duration::minutes(30),
            refresh_token_ttl: Duration::days(7),
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Postgres URL; `None` runs on in-memory stores
    pub database_url: Option<String>,
    /// Allowed browser origin for CORS; `None` allows any
    pub cors_origin: Option<String>,
    pub jwt: JwtConfig,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_env("PORT", 8000u16)?;
        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());
        let cors_origin = env::var("CORS_ORIGIN").ok().filter(|origin| !origin.is_empty());

        let secret = match env::var("JWT_SECRET_KEY") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET_KEY is not set, using the development secret");
                "dev-secret-key-change-in-production".to_string()
            }
        };
        let algorithm_name = env::var("JWT_ALGORITHM").unwrap_or_else(|_| "HS256".to_string());
        let algorithm = Algorithm::from_str(&algorithm_name)
            .with_context(|| format!("Invalid JWT_ALGORITHM: {}", algorithm_name))?;

        let access_minutes = parse_env("ACCESS_TOKEN_EXPIRE_MINUTES", 30i64)?;
        let refresh_days = parse_env("REFRESH_TOKEN_EXPIRE_DAYS", 7i64)?;

        Ok(Self {
            host,
            port,
            database_url,
            cors_origin,
            jwt: JwtConfig {
                secret,
                algorithm,
                access_token_ttl: positive_duration(
                    "ACCESS_TOKEN_EXPIRE_MINUTES",
                    access_minutes,
                    Duration::try_minutes,
                )?,
                refresh_token_ttl: positive_duration(
                    "REFRESH_TOKEN_EXPIRE_DAYS",
                    refresh_days,
                    Duration::try_days,
                )?,
            },
        })
    }

    /// In-memory configuration with a fixed secret, for tests and local runs
    pub fn for_testing() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_url: None,
            cors_origin: None,
            jwt: JwtConfig::new("test-secret-key-for-testing-only"),
        }
    }
}

/// Parse environment variable with default value.
fn parse_env<T: FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {}: {}", name, e)),
        Err(_) => Ok(default),
    }
}

/// Token lifetime from a count of units; zero, negative and overflowing values are rejected
fn positive_duration(name: &str, value: i64, to_duration: fn(i64) -> Option<Duration>) -> Result<Duration> {
    if value <= 0 {
        anyhow::bail!("Invalid {}: must be greater than zero, got {}", name, value);
    }

    to_duration(value).with_context(|| format!("Invalid {}: {} is out of range", name, value))
}
