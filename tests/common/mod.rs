#![allow(dead_code)]

use chrono::{Duration, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use uuid::Uuid;

use herald::domain::{Announcement, Category, Priority, Role, UserProfile};
use herald::repository::{SqliteUserRepository, UserRepository};

pub async fn setup_pool() -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

pub async fn seed_author(pool: &SqlitePool, name: &str) -> anyhow::Result<UserProfile> {
    let repo = SqliteUserRepository::new(pool.clone());
    let now = Utc::now();

    let user = repo
        .create(UserProfile {
            id: Uuid::new_v4(),
            email: format!("{}@campus.edu", name.to_lowercase().replace(' ', ".")),
            name: name.to_string(),
            first_name: None,
            last_name: None,
            role: Role::Lecturer,
            department: "Computer Science".to_string(),
            level: None,
            avatar: None,
            created_at: now,
            updated_at: now,
        })
        .await?;

    Ok(user)
}

/// A publishable announcement `age_hours` old, so relative ordering in
/// tests is explicit.
pub fn announcement(
    author: &UserProfile,
    title: &str,
    category: Category,
    department: &str,
    priority: Priority,
    age_hours: i64,
) -> Announcement {
    let ts = Utc::now() - Duration::hours(age_hours);

    Announcement {
        id: Uuid::new_v4(),
        title: title.to_string(),
        excerpt: format!("{} (excerpt)", title),
        content: format!("{} (full text)", title),
        category,
        department: department.to_string(),
        priority,
        author_id: author.id,
        author: None,
        image_url: None,
        published_at: ts,
        view_count: 0,
        is_deleted: false,
        created_at: ts,
        updated_at: ts,
    }
}
