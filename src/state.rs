//! Wiring of the PostgreSQL-backed service.

use crate::application::services::WatchListService;
use crate::config::Config;
use crate::infrastructure::persistence::{
    PgSeriesCatalog, PgSeriesStateRepository, PgUserRepository, PgWatchListRepository,
};
use sqlx::PgPool;
use std::sync::Arc;

/// Watch list service over the PostgreSQL repositories.
pub type PgWatchListService = WatchListService<
    PgUserRepository,
    PgWatchListRepository,
    PgSeriesStateRepository,
    PgSeriesCatalog,
>;

/// Shared handles built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<PgPool>,
    pub watch_list_service: Arc<PgWatchListService>,
}

impl AppState {
    pub fn new(pool: Arc<PgPool>, config: &Config) -> Self {
        let service = WatchListService::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgWatchListRepository::new(pool.clone())),
            Arc::new(PgSeriesStateRepository::new(pool.clone())),
            Arc::new(PgSeriesCatalog::new(pool.clone())),
        )
        .with_serialized_mutations(config.serialize_mutations);

        Self {
            pool,
            watch_list_service: Arc::new(service),
        }
    }
}
