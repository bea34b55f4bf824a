use std::sync::Arc;

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::warn;

use rolegate_config::{AuthConfig, CorsConfig, JwtConfig};
use rolegate_core::{BcryptHasher, PasswordHasher};
use rolegate_db::{MemoryUserStore, PgUserStore, UserStore, init_db_pool};

use crate::middleware::role::RoleAccessGate;
use crate::modules::auth::{PostAuthRouter, RegistrationProcessor};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub auth_config: Arc<AuthConfig>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub registration: RegistrationProcessor,
    pub post_auth: PostAuthRouter,
    pub gate: RoleAccessGate,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn UserStore>,
        auth_config: AuthConfig,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
    ) -> Self {
        let auth_config = Arc::new(auth_config);
        let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptHasher::new(auth_config.bcrypt_cost));

        Self {
            registration: RegistrationProcessor::new(
                auth_config.clone(),
                store.clone(),
                hasher.clone(),
            ),
            post_auth: PostAuthRouter::new(auth_config.home.clone()),
            gate: RoleAccessGate::default(),
            store,
            hasher,
            auth_config,
            jwt_config,
            cors_config,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }
}

/// Picks the user store from `USER_STORE` (`memory`) or `DATABASE_URL`.
pub async fn init_user_store() -> anyhow::Result<Arc<dyn UserStore>> {
    let kind = std::env::var("USER_STORE").unwrap_or_default();

    if kind.eq_ignore_ascii_case("memory") {
        warn!("Using the in-memory user store; accounts are lost on restart");
        return Ok(Arc::new(MemoryUserStore::new()));
    }

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_url)
        .await
        .context("Failed to connect to the database")?;

    Ok(Arc::new(PgUserStore::new(pool)))
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    Ok(AppState::new(
        init_user_store().await?,
        AuthConfig::from_env(),
        JwtConfig::from_env(),
        CorsConfig::from_env(),
    ))
}
