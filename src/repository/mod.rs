use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::*;
use crate::error::Result;

pub mod announcement_repository;
pub mod user_repository;

pub use announcement_repository::SqliteAnnouncementRepository;
pub use user_repository::SqliteUserRepository;

#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    async fn create(&self, announcement: Announcement) -> Result<Announcement>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>>;
    /// Filtered feed read. Conjunctive across category/department/priority,
    /// disjunctive substring search over title/excerpt/content, soft-deleted
    /// rows excluded, newest published first.
    async fn list(&self, filter: &FeedFilter) -> Result<Vec<Announcement>>;
    /// Exact total for the same predicates, ignoring pagination.
    async fn count(&self, filter: &FeedFilter) -> Result<i64>;
    async fn list_related(
        &self,
        id: Uuid,
        category: Category,
        department: &str,
        limit: i64,
    ) -> Result<Vec<Announcement>>;
    async fn update(&self, id: Uuid, announcement: Announcement) -> Result<Announcement>;
    async fn soft_delete(&self, id: Uuid) -> Result<()>;
    async fn get_view_count(&self, id: Uuid) -> Result<Option<i64>>;
    async fn set_view_count(&self, id: Uuid, value: i64) -> Result<()>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: UserProfile) -> Result<UserProfile>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>>;
    async fn update(&self, id: Uuid, user: UserProfile) -> Result<UserProfile>;
    async fn list(&self, query: &UserQuery) -> Result<Vec<UserProfile>>;
    async fn stats(&self) -> Result<UserStats>;
}
