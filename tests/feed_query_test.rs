mod common;

use std::sync::Arc;

use herald::domain::{Category, FeedFilter, Priority};
use herald::feed::{FeedErrorKind, FeedQuery};
use herald::repository::{AnnouncementRepository, SqliteAnnouncementRepository};
use uuid::Uuid;

#[test]
fn blank_search_is_normalized_away() {
    let filter = FeedFilter {
        search: Some("   ".to_string()),
        ..Default::default()
    }
    .normalized();
    assert_eq!(filter.search, None);

    let filter = FeedFilter {
        search: Some("exam".to_string()),
        ..Default::default()
    }
    .normalized();
    assert_eq!(filter.search.as_deref(), Some("exam"));
}

#[test]
fn without_pagination_keeps_predicates() {
    let filter = FeedFilter {
        category: Some(Category::Academic),
        limit: Some(10),
        offset: Some(20),
        ..Default::default()
    };
    let stripped = filter.without_pagination();
    assert_eq!(stripped.category, Some(Category::Academic));
    assert_eq!(stripped.limit, None);
    assert_eq!(stripped.offset, None);
}

#[tokio::test]
async fn empty_result_is_not_a_failure() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let repo = Arc::new(SqliteAnnouncementRepository::new(pool.clone()));
    let feed = FeedQuery::new(repo, 5);

    let batch = feed.fetch(&FeedFilter::default()).await;

    assert!(!batch.is_failed());
    assert!(batch.error.is_none());
    assert_eq!(batch.items.map(|v| v.len()), Some(0));

    Ok(())
}

#[tokio::test]
async fn backend_failure_is_captured_in_the_envelope() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let repo = Arc::new(SqliteAnnouncementRepository::new(pool.clone()));
    let feed = FeedQuery::new(repo, 5);

    // Closing the pool makes every subsequent read fail at the backend.
    pool.close().await;

    let batch = feed.fetch(&FeedFilter::default()).await;
    assert!(batch.is_failed());
    assert!(batch.items.is_none());
    assert_eq!(batch.error, Some(FeedErrorKind::Backend));

    let count = feed.count(&FeedFilter::default()).await;
    assert_eq!(count.count, 0);
    assert_eq!(count.error, Some(FeedErrorKind::Backend));

    let single = feed.fetch_one(Uuid::new_v4()).await;
    assert!(single.item.is_none());
    assert_eq!(single.error, Some(FeedErrorKind::Backend));

    Ok(())
}

#[tokio::test]
async fn fetch_one_distinguishes_missing_from_failed() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let author = common::seed_author(&pool, "Ada Lovelace").await?;
    let repo_impl = SqliteAnnouncementRepository::new(pool.clone());
    let existing = repo_impl
        .create(common::announcement(
            &author,
            "Present",
            Category::General,
            "Computer Science",
            Priority::Medium,
            1,
        ))
        .await?;

    let feed = FeedQuery::new(Arc::new(SqliteAnnouncementRepository::new(pool)), 5);

    let found = feed.fetch_one(existing.id).await;
    assert_eq!(found.item.map(|a| a.id), Some(existing.id));
    assert!(found.error.is_none());

    let missing = feed.fetch_one(Uuid::new_v4()).await;
    assert!(missing.item.is_none());
    assert_eq!(missing.error, Some(FeedErrorKind::NotFound));

    Ok(())
}

#[tokio::test]
async fn related_applies_the_configured_default_limit() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let author = common::seed_author(&pool, "Alan Turing").await?;
    let repo_impl = SqliteAnnouncementRepository::new(pool.clone());

    let original = repo_impl
        .create(common::announcement(
            &author,
            "Original",
            Category::Academic,
            "Computer Science",
            Priority::Medium,
            1,
        ))
        .await?;
    for age in 2..=9 {
        repo_impl
            .create(common::announcement(
                &author,
                &format!("related-{}", age),
                Category::Academic,
                "Computer Science",
                Priority::Medium,
                age,
            ))
            .await?;
    }

    let feed = FeedQuery::new(Arc::new(SqliteAnnouncementRepository::new(pool)), 5);

    let defaulted = feed
        .related(original.id, Category::Academic, "Computer Science", None)
        .await;
    assert_eq!(defaulted.items.map(|v| v.len()), Some(5));

    let explicit = feed
        .related(original.id, Category::Academic, "Computer Science", Some(2))
        .await;
    assert_eq!(explicit.items.map(|v| v.len()), Some(2));

    Ok(())
}
