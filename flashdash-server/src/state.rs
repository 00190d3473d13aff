//! Application state for flashdash-server

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use sqlx::PgPool;

use crate::config::Config;
use crate::forth::ForthClient;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// JWT secret for session tokens
    pub jwt_secret: String,
    /// ForthCRM HTTP client (None while FORTH_CRM_URL is unset)
    pub forth: Option<ForthClient>,
    /// Environment: development | staging | production
    pub environment: String,
    /// Seed endpoint gate result, fixed at startup
    pub seed_allowed: bool,
    /// Bootstrap admin credentials from server configuration
    pub seed_email: Option<String>,
    pub seed_password: Option<String>,
    /// Background CRM sync interval in seconds
    pub sync_interval_secs: u64,
    /// True while a sync pass is running (sync status endpoint)
    sync_active: Arc<AtomicBool>,
}

impl AppState {
    pub fn sync_active(&self) -> bool {
        self.sync_active.load(Ordering::Relaxed)
    }

    pub fn set_sync_active(&self, active: bool) {
        self.sync_active.store(active, Ordering::Relaxed);
    }

    /// Create a new AppState: connect the pool and run migrations
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        let forth = config
            .forth_crm_url
            .as_ref()
            .map(|url| ForthClient::new(url.clone(), config.forth_users_url.clone()))
            .transpose()?;

        Ok(Self {
            pool,
            jwt_secret: config.jwt_secret.clone(),
            forth,
            environment: config.environment.clone(),
            seed_allowed: config.seed_allowed(),
            seed_email: config.seed_email.clone(),
            seed_password: config.seed_password.clone(),
            sync_interval_secs: config.sync_interval_secs,
            sync_active: Arc::new(AtomicBool::new(false)),
        })
    }

    /// State for unit tests that never touch the database. The pool is
    /// lazy, so no connection is attempted until a query runs.
    #[cfg(test)]
    pub(crate) fn for_tests(jwt_secret: &str) -> Self {
        Self {
            pool: PgPool::connect_lazy("postgres://localhost/flashdash")
                .expect("lazy pool options are static"),
            jwt_secret: jwt_secret.to_string(),
            forth: None,
            environment: "development".to_string(),
            seed_allowed: false,
            seed_email: None,
            seed_password: None,
            sync_interval_secs: 300,
            sync_active: Arc::new(AtomicBool::new(false)),
        }
    }
}
