use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: Category,
    pub department: String,
    pub priority: Priority,
    pub author_id: Uuid,
    /// Denormalized from the users table on read paths.
    pub author: Option<Author>,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub view_count: i64,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Category {
    Academic,
    Event,
    Sport,
    StudentAffairs,
    Urgent,
    General,
    Administrative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAnnouncementRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 500))]
    pub excerpt: String,
    #[validate(length(min = 1))]
    pub content: String,
    pub category: Category,
    #[validate(length(min = 1, max = 100))]
    pub department: String,
    pub priority: Priority,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, Default, ToSchema)]
pub struct UpdateAnnouncementRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 500))]
    pub excerpt: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
    pub category: Option<Category>,
    #[validate(length(min = 1, max = 100))]
    pub department: Option<String>,
    pub priority: Option<Priority>,
    pub image_url: Option<String>,
}
