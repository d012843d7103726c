use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppResult;

/// State shared by every handler
///
/// Cheap to clone: the pool and the JWT service are reference counted.
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Open the database (applying migrations) and build the JWT service
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self::with_pool(config.clone(), db.pool))
    }

    /// Build state around an existing pool
    pub fn with_pool(config: Config, pool: SqlitePool) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            pool,
            jwt_service,
        }
    }

    pub fn get_jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }
}
