use std::sync::Arc;

use crate::{config::Settings, feed::FeedStatsPoller, service::ServiceContext};

#[derive(Clone)]
pub struct AppState {
    pub service_context: Arc<ServiceContext>,
    pub stats: Arc<FeedStatsPoller>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(
        service_context: Arc<ServiceContext>,
        stats: Arc<FeedStatsPoller>,
        settings: Arc<Settings>,
    ) -> Self {
        Self {
            service_context,
            stats,
            settings,
        }
    }
}
