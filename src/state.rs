use std::sync::Arc;

use crate::config::AppConfig;
use crate::metrics::Metrics;
use crate::tree::TreeStore;

/// The shared application state.
///
/// Cloned into every handler by axum; all fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool, used directly only by the readiness probe.
    pub db: sqlx::SqlitePool,
    /// Transactional entry point for all tree operations.
    pub tree: TreeStore,
    /// The application configuration.
    pub config: Arc<AppConfig>,
    /// Operation counters.
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(db: sqlx::SqlitePool, config: AppConfig) -> Self {
        Self { tree: TreeStore::new(db.clone()), db, config: Arc::new(config), metrics: Metrics::new() }
    }
}
