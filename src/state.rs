use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{auth::JwtKeys, config::AppConfig, onboarding::OnboardingSchema};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub jwt: JwtKeys,
    pub schema: Arc<OnboardingSchema>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        let jwt = JwtKeys::new(&config.jwt);

        // A malformed form definition must stop the process, not a request.
        let schema = Arc::new(OnboardingSchema::new().context("build onboarding schema")?);

        Ok(Self {
            db,
            config,
            jwt,
            schema,
        })
    }
}
