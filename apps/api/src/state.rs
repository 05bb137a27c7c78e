use sqlx::SqlitePool;

use crate::config::Config;
use crate::pipeline::Pipeline;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub pipeline: Pipeline,
    pub sessions: SessionStore,
    pub config: Config,
}
