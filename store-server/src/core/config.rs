use std::path::PathBuf;

use crate::auth::JwtConfig;
use crate::gateway::GatewayConfig;

/// Server configuration, read from the environment exactly once at startup
/// and passed around by reference. Domain code never touches `std::env`.
///
/// | Env var | Default | Purpose |
/// |---------|---------|---------|
/// | WORK_DIR | ./data | database and log location |
/// | HTTP_PORT | 5000 | HTTP API port |
/// | BASE_URL | http://localhost:<port> | public URL for gateway callbacks |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | GATEWAY_MODE | TEST | TEST \| LIVE payment page |
/// | GATEWAY_MERCHANT_KEY | (empty) | gateway merchant key |
/// | GATEWAY_MERCHANT_SALT | (empty) | gateway signing salt |
/// | SEED_ADMIN_EMAIL / SEED_ADMIN_PASSWORD | (unset) | first superadmin, created only if the table is empty |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Public base URL, used to build callback and landing-page URLs
    pub base_url: String,
    /// Run environment: development | staging | production
    pub environment: String,
    /// JWT settings for the admin panel
    pub jwt: JwtConfig,
    /// Payment gateway credentials and mode
    pub gateway: GatewayConfig,
    /// Bootstrap superadmin credentials (used once, when admin_users is empty)
    pub seed_admin_email: Option<String>,
    pub seed_admin_password: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, with defaults.
    pub fn from_env() -> Self {
        let http_port = std::env::var("HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port,
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{http_port}")),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            jwt: JwtConfig::from_env(),
            gateway: GatewayConfig::from_env(),
            seed_admin_email: std::env::var("SEED_ADMIN_EMAIL").ok(),
            seed_admin_password: std::env::var("SEED_ADMIN_PASSWORD").ok(),
        }
    }

    /// Override work dir and port, keeping everything else env-derived.
    /// Used by tests.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config.base_url = format!("http://localhost:{http_port}");
        config
    }

    /// Directory holding the SQLite database file.
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Gateway success-callback URL presented to the gateway.
    pub fn success_callback_url(&self) -> String {
        format!("{}/api/checkout/gateway-callback/success", self.base_url)
    }

    /// Gateway failure-callback URL presented to the gateway.
    pub fn failure_callback_url(&self) -> String {
        format!("{}/api/checkout/gateway-callback/failure", self.base_url)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
