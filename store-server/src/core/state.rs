//! Shared server state

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::auth::{JwtService, password};
use crate::checkout::{CheckoutService, Reconciler};
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::admin_user;
use crate::utils::AppError;
use shared::models::AdminRole;

/// Everything a request handler needs, cloned per request.
#[derive(Clone)]
pub struct ServerState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtService>,
}

impl ServerState {
    /// Open the database, run migrations and seed the first superadmin.
    pub async fn initialize(config: Config) -> Result<Self, AppError> {
        let db_dir = config.database_dir();
        std::fs::create_dir_all(&db_dir)
            .map_err(|e| AppError::internal(format!("Failed to create {db_dir:?}: {e}")))?;
        let db_path = db_dir.join("store.db");
        let db = DbService::new(&db_path.to_string_lossy()).await?;

        let jwt = Arc::new(JwtService::with_config(config.jwt.clone()));
        let state = Self {
            pool: db.pool,
            config: Arc::new(config),
            jwt,
        };
        state.seed_admin().await?;
        Ok(state)
    }

    /// Create the bootstrap superadmin, only when the table is empty.
    async fn seed_admin(&self) -> Result<(), AppError> {
        if admin_user::count(&self.pool).await? > 0 {
            return Ok(());
        }
        let (Some(email), Some(pass)) = (
            self.config.seed_admin_email.as_deref(),
            self.config.seed_admin_password.as_deref(),
        ) else {
            warn!("admin_users is empty and no seed credentials are set; back office is unreachable");
            return Ok(());
        };
        let hash = password::hash_password(pass)
            .map_err(|e| AppError::internal(format!("Failed to hash seed password: {e}")))?;
        let admin = admin_user::create(&self.pool, email, &hash, AdminRole::Superadmin).await?;
        info!(admin_id = admin.id, email = %admin.email, "seeded bootstrap superadmin");
        Ok(())
    }

    pub fn checkout(&self) -> CheckoutService {
        CheckoutService::new(self.pool.clone(), self.config.clone())
    }

    pub fn reconciler(&self) -> Reconciler {
        Reconciler::new(self.pool.clone(), self.config.clone())
    }
}
