use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
    pub department: String,
    pub level: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Lecturer,
    Admin,
}

impl Role {
    /// Lecturers and admins may author and moderate announcements.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Lecturer | Role::Admin)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub department: Option<String>,
    pub level: Option<String>,
    pub avatar: Option<String>,
}

/// Directory listing filters. `search` matches name or email.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserQuery {
    pub role: Option<Role>,
    pub department: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserStats {
    pub total: i64,
    pub students: i64,
    pub lecturers: i64,
    pub admins: i64,
}
