mod common;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Barrier;
use uuid::Uuid;

use herald::domain::{Announcement, Category, FeedFilter, Priority};
use herald::error::{AppError, Result};
use herald::feed::{AtomicCounter, SqliteAtomicCounter, ViewCountService};
use herald::repository::{AnnouncementRepository, SqliteAnnouncementRepository};

/// Stands in for a deployment where the atomic increment operation does
/// not exist. The error text is what the missing-procedure case reports,
/// but the service treats it like any other failure.
struct UnavailableCounter;

#[async_trait]
impl AtomicCounter for UnavailableCounter {
    async fn increment_view_count(&self, _id: Uuid) -> Result<()> {
        Err(AppError::Database(
            "no such function: increment_view_count".to_string(),
        ))
    }
}

/// Delegates to the real repository, but holds every fallback read at a
/// barrier so that all participants observe the counter before any of
/// them writes it back.
struct ReadHoldingRepository {
    inner: SqliteAnnouncementRepository,
    barrier: Barrier,
}

#[async_trait]
impl AnnouncementRepository for ReadHoldingRepository {
    async fn create(&self, announcement: Announcement) -> Result<Announcement> {
        self.inner.create(announcement).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>> {
        self.inner.find_by_id(id).await
    }

    async fn list(&self, filter: &FeedFilter) -> Result<Vec<Announcement>> {
        self.inner.list(filter).await
    }

    async fn count(&self, filter: &FeedFilter) -> Result<i64> {
        self.inner.count(filter).await
    }

    async fn list_related(
        &self,
        id: Uuid,
        category: Category,
        department: &str,
        limit: i64,
    ) -> Result<Vec<Announcement>> {
        self.inner.list_related(id, category, department, limit).await
    }

    async fn update(&self, id: Uuid, announcement: Announcement) -> Result<Announcement> {
        self.inner.update(id, announcement).await
    }

    async fn soft_delete(&self, id: Uuid) -> Result<()> {
        self.inner.soft_delete(id).await
    }

    async fn get_view_count(&self, id: Uuid) -> Result<Option<i64>> {
        let value = self.inner.get_view_count(id).await;
        self.barrier.wait().await;
        value
    }

    async fn set_view_count(&self, id: Uuid, value: i64) -> Result<()> {
        self.inner.set_view_count(id, value).await
    }
}

#[tokio::test]
async fn atomic_path_increments_by_one() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let author = common::seed_author(&pool, "Ada Lovelace").await?;
    let repo = Arc::new(SqliteAnnouncementRepository::new(pool.clone()));
    let created = repo
        .create(common::announcement(
            &author,
            "Viewed",
            Category::General,
            "Computer Science",
            Priority::Medium,
            1,
        ))
        .await?;

    let service = ViewCountService::new(
        Arc::new(SqliteAtomicCounter::new(pool.clone())),
        repo.clone(),
    );

    service.record_view(created.id).await;
    service.record_view(created.id).await;

    assert_eq!(repo.get_view_count(created.id).await?, Some(2));

    Ok(())
}

#[tokio::test]
async fn fallback_reads_current_and_writes_plus_one() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let author = common::seed_author(&pool, "Grace Hopper").await?;
    let repo = Arc::new(SqliteAnnouncementRepository::new(pool.clone()));
    let created = repo
        .create(common::announcement(
            &author,
            "Viewed",
            Category::General,
            "Computer Science",
            Priority::Medium,
            1,
        ))
        .await?;
    repo.set_view_count(created.id, 7).await?;

    let service = ViewCountService::new(Arc::new(UnavailableCounter), repo.clone());
    service.record_view(created.id).await;

    assert_eq!(repo.get_view_count(created.id).await?, Some(8));

    Ok(())
}

#[tokio::test]
async fn a_failed_increment_for_a_missing_row_is_silent() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let repo = Arc::new(SqliteAnnouncementRepository::new(pool));

    let service = ViewCountService::new(Arc::new(UnavailableCounter), repo);

    // Nothing to assert beyond "does not panic, does not error".
    service.record_view(Uuid::new_v4()).await;

    Ok(())
}

#[tokio::test]
async fn overlapping_fallbacks_lose_an_update() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let author = common::seed_author(&pool, "Alan Turing").await?;
    let plain_repo = SqliteAnnouncementRepository::new(pool.clone());
    let created = plain_repo
        .create(common::announcement(
            &author,
            "Contended",
            Category::General,
            "Computer Science",
            Priority::Medium,
            1,
        ))
        .await?;
    plain_repo.set_view_count(created.id, 7).await?;

    let holding_repo = Arc::new(ReadHoldingRepository {
        inner: SqliteAnnouncementRepository::new(pool.clone()),
        barrier: Barrier::new(2),
    });
    let service = Arc::new(ViewCountService::new(
        Arc::new(UnavailableCounter),
        holding_repo,
    ));

    // Both fallbacks read 7 before either writes, so both write 8. The
    // second increment is lost, exactly as the contract documents.
    tokio::join!(service.record_view(created.id), service.record_view(created.id));

    assert_eq!(plain_repo.get_view_count(created.id).await?, Some(8));

    Ok(())
}
