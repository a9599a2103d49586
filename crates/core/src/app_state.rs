use diesel::r2d2::{self, ConnectionManager};
use diesel::PgConnection;
use std::sync::Arc;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

pub use cashq_primitives::models::app_config::AppConfig;

/// Shared handle the in-process operations run against: the connection pool
/// plus the env-driven fee/invoice configuration.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(db: DbPool, config: AppConfig) -> Arc<Self> {
        Arc::new(Self { db, config })
    }
}
