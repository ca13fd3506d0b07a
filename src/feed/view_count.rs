use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    repository::AnnouncementRepository,
};

/// The atomic counter collaborator: a backend-side operation that
/// increments race-free, when the deployment provides one.
#[async_trait]
pub trait AtomicCounter: Send + Sync {
    async fn increment_view_count(&self, id: Uuid) -> Result<()>;
}

pub struct SqliteAtomicCounter {
    pool: SqlitePool,
}

impl SqliteAtomicCounter {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AtomicCounter for SqliteAtomicCounter {
    async fn increment_view_count(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();
        sqlx::query("UPDATE announcements SET view_count = view_count + 1 WHERE id = ?")
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}

/// Best-effort view counting. Each call is one increment; nothing here
/// guards against a caller recording the same view twice.
pub struct ViewCountService {
    counter: Arc<dyn AtomicCounter>,
    repo: Arc<dyn AnnouncementRepository>,
}

impl ViewCountService {
    pub fn new(counter: Arc<dyn AtomicCounter>, repo: Arc<dyn AnnouncementRepository>) -> Self {
        Self { counter, repo }
    }

    /// Increments the announcement's view counter. Failures in either path
    /// are logged and swallowed; callers never wait on the outcome.
    ///
    /// A missing atomic operation is indistinguishable from a transient
    /// failure, so any primary-path error degrades to read-modify-write.
    /// Two overlapping fallbacks can both read N and both write N+1; the
    /// lost update is part of the documented contract, not fixed here.
    pub async fn record_view(&self, id: Uuid) {
        let primary_err = match self.counter.increment_view_count(id).await {
            Ok(()) => return,
            Err(e) => e,
        };

        tracing::warn!(
            %id,
            error = %primary_err,
            "Atomic view-count increment failed, using read-modify-write fallback"
        );

        match self.repo.get_view_count(id).await {
            Ok(Some(current)) => {
                if let Err(e) = self.repo.set_view_count(id, current + 1).await {
                    tracing::error!(%id, error = %e, "Fallback view-count write failed");
                }
            }
            Ok(None) => {
                tracing::debug!(%id, "Skipping view-count fallback, announcement not found");
            }
            Err(e) => {
                tracing::error!(%id, error = %e, "Fallback view-count read failed");
            }
        }
    }
}
