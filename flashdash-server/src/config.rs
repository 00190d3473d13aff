//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// FlashDash server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// Listen address, e.g. "0.0.0.0:8080"
    pub bind_addr: String,
    /// Environment: development | staging | production
    pub environment: String,
    /// JWT signing secret for session tokens
    pub jwt_secret: String,
    /// ForthCRM lead endpoint; submit-lead answers 500 while unset
    pub forth_crm_url: Option<String>,
    /// ForthCRM users endpoint (mapping panel + sync task)
    pub forth_users_url: Option<String>,
    /// Bootstrap admin credentials for the dev seed endpoint
    pub seed_email: Option<String>,
    pub seed_password: Option<String>,
    /// Seed endpoint gate; ignored in production
    pub enable_dev_seed: bool,
    /// Background CRM sync interval in seconds
    pub sync_interval_secs: u64,
}

impl Config {
    /// Require a secret env var: must be set and non-empty outside development.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            forth_crm_url: std::env::var("FORTH_CRM_URL").ok().filter(|s| !s.is_empty()),
            forth_users_url: std::env::var("FORTH_USERS_URL")
                .ok()
                .filter(|s| !s.is_empty()),
            seed_email: std::env::var("SEED_EMAIL").ok().filter(|s| !s.is_empty()),
            seed_password: std::env::var("SEED_PASSWORD").ok().filter(|s| !s.is_empty()),
            enable_dev_seed: std::env::var("ENABLE_DEV_SEED")
                .map(|v| v == "true")
                .unwrap_or(false),
            sync_interval_secs: std::env::var("SYNC_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            environment,
        })
    }

    /// Seed is allowed only outside production and with the flag on
    pub fn seed_allowed(&self) -> bool {
        self.environment != "production" && self.enable_dev_seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_allowed() {
        let config = Config {
            database_url: "postgres://localhost/flashdash".into(),
            bind_addr: "0.0.0.0:8080".into(),
            environment: "development".into(),
            jwt_secret: "secret".into(),
            forth_crm_url: None,
            forth_users_url: None,
            seed_email: None,
            seed_password: None,
            enable_dev_seed: true,
            sync_interval_secs: 3600,
        };
        assert!(config.seed_allowed());

        let off = Config {
            enable_dev_seed: false,
            ..config.clone()
        };
        assert!(!off.seed_allowed());

        let prod = Config {
            environment: "production".into(),
            ..config
        };
        assert!(!prod.seed_allowed());
    }
}
