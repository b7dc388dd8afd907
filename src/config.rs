use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let host = env_or("APP_HOST", "0.0.0.0");
        let port = env_or("APP_PORT", "8080")
            .parse::<u16>()
            .context("APP_PORT must be a port number")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET is not set")?,
            issuer: env_or("JWT_ISSUER", "gangway"),
            audience: env_or("JWT_AUDIENCE", "gangway-users"),
            ttl_minutes: env_or("JWT_TTL_MINUTES", "60")
                .parse::<i64>()
                .context("JWT_TTL_MINUTES must be an integer")?,
            refresh_ttl_minutes: env_or("JWT_REFRESH_TTL_MINUTES", "20160")
                .parse::<i64>()
                .context("JWT_REFRESH_TTL_MINUTES must be an integer")?,
        };
        Ok(Self {
            database_url,
            host,
            port,
            jwt,
        })
    }
}
