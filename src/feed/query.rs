use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::{
    domain::{Announcement, Category, FeedFilter},
    repository::AnnouncementRepository,
};

/// What went wrong behind the envelope boundary. The distinction the rest
/// of the system cares about is "the backend failed" versus "the row does
/// not exist"; anything finer-grained stays in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedErrorKind {
    Backend,
    NotFound,
}

/// Result envelope for feed fetches. `items: None` means the fetch failed,
/// which is not the same as an empty result.
#[derive(Debug)]
pub struct FeedBatch {
    pub items: Option<Vec<Announcement>>,
    pub error: Option<FeedErrorKind>,
}

impl FeedBatch {
    fn ok(items: Vec<Announcement>) -> Self {
        Self {
            items: Some(items),
            error: None,
        }
    }

    fn failed(kind: FeedErrorKind) -> Self {
        Self {
            items: None,
            error: Some(kind),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.items.is_none()
    }
}

/// Count envelope. The count is for UI messaging only and reads as zero on
/// failure, never as an input to paging decisions.
#[derive(Debug)]
pub struct FeedCount {
    pub count: i64,
    pub error: Option<FeedErrorKind>,
}

/// Single-entity envelope.
#[derive(Debug)]
pub struct FeedSingle {
    pub item: Option<Announcement>,
    pub error: Option<FeedErrorKind>,
}

/// Translates a [`FeedFilter`] into storage reads. Every storage error is
/// caught here, logged, and folded into the envelope; nothing above this
/// boundary sees a raw backend error.
pub struct FeedQuery {
    repo: Arc<dyn AnnouncementRepository>,
    related_limit: i64,
}

impl FeedQuery {
    pub fn new(repo: Arc<dyn AnnouncementRepository>, related_limit: i64) -> Self {
        Self {
            repo,
            related_limit,
        }
    }

    pub async fn fetch(&self, filter: &FeedFilter) -> FeedBatch {
        match self.repo.list(filter).await {
            Ok(items) => FeedBatch::ok(items),
            Err(e) => {
                tracing::error!(error = %e, "Error fetching announcements");
                FeedBatch::failed(FeedErrorKind::Backend)
            }
        }
    }

    pub async fn count(&self, filter: &FeedFilter) -> FeedCount {
        match self.repo.count(&filter.without_pagination()).await {
            Ok(count) => FeedCount { count, error: None },
            Err(e) => {
                tracing::error!(error = %e, "Error counting announcements");
                FeedCount {
                    count: 0,
                    error: Some(FeedErrorKind::Backend),
                }
            }
        }
    }

    pub async fn fetch_one(&self, id: Uuid) -> FeedSingle {
        match self.repo.find_by_id(id).await {
            Ok(Some(item)) => FeedSingle {
                item: Some(item),
                error: None,
            },
            Ok(None) => FeedSingle {
                item: None,
                error: Some(FeedErrorKind::NotFound),
            },
            Err(e) => {
                tracing::error!(error = %e, %id, "Error fetching announcement");
                FeedSingle {
                    item: None,
                    error: Some(FeedErrorKind::Backend),
                }
            }
        }
    }

    /// Up to `limit` (default from config) other announcements sharing the
    /// category or department, excluding the original, newest first.
    pub async fn related(
        &self,
        id: Uuid,
        category: Category,
        department: &str,
        limit: Option<i64>,
    ) -> FeedBatch {
        let limit = limit.unwrap_or(self.related_limit);
        match self.repo.list_related(id, category, department, limit).await {
            Ok(items) => FeedBatch::ok(items),
            Err(e) => {
                tracing::error!(error = %e, %id, "Error fetching related announcements");
                FeedBatch::failed(FeedErrorKind::Backend)
            }
        }
    }
}
