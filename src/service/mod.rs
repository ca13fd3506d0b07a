pub mod settings_service;

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::FeedConfig;
use crate::feed::{FeedQuery, SqliteAtomicCounter, ViewCountService};
use crate::repository::*;

pub use settings_service::SettingsService;

pub struct ServiceContext {
    pub announcement_repo: Arc<dyn AnnouncementRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub feed: Arc<FeedQuery>,
    pub view_counts: Arc<ViewCountService>,
    pub settings_service: Arc<SettingsService>,
    pub db_pool: SqlitePool,
}

impl ServiceContext {
    pub fn new(
        announcement_repo: Arc<dyn AnnouncementRepository>,
        user_repo: Arc<dyn UserRepository>,
        settings_service: Arc<SettingsService>,
        feed_config: &FeedConfig,
        db_pool: SqlitePool,
    ) -> Self {
        let feed = Arc::new(FeedQuery::new(
            announcement_repo.clone(),
            feed_config.related_limit,
        ));
        let counter = Arc::new(SqliteAtomicCounter::new(db_pool.clone()));
        let view_counts = Arc::new(ViewCountService::new(counter, announcement_repo.clone()));

        Self {
            announcement_repo,
            user_repo,
            feed,
            view_counts,
            settings_service,
            db_pool,
        }
    }
}
