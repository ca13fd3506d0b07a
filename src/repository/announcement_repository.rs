use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Announcement, Author, Category, FeedFilter, Priority},
    error::{AppError, Result},
    repository::AnnouncementRepository,
};

/// Range size used when a caller supplies an offset without a limit.
const DEFAULT_RANGE_LIMIT: i64 = 10;

const SELECT_COLUMNS: &str = r#"
    a.id, a.title, a.excerpt, a.content, a.category, a.department, a.priority,
    a.author_id, u.name AS author_name, u.avatar AS author_avatar,
    a.image_url, a.published_at, a.view_count, a.is_deleted,
    a.created_at, a.updated_at
"#;

#[derive(FromRow)]
struct AnnouncementRow {
    id: String,
    title: String,
    excerpt: String,
    content: String,
    category: String,
    department: String,
    priority: String,
    author_id: String,
    author_name: Option<String>,
    author_avatar: Option<String>,
    image_url: Option<String>,
    published_at: NaiveDateTime,
    view_count: i64,
    is_deleted: i32,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteAnnouncementRepository {
    pool: SqlitePool,
}

impl SqliteAnnouncementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_announcement(row: AnnouncementRow) -> Result<Announcement> {
        let author_id =
            Uuid::parse_str(&row.author_id).map_err(|e| AppError::Database(e.to_string()))?;
        let author = row.author_name.map(|name| Author {
            id: author_id,
            name,
            avatar: row.author_avatar,
        });

        Ok(Announcement {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            title: row.title,
            excerpt: row.excerpt,
            content: row.content,
            category: Self::parse_category(&row.category)?,
            department: row.department,
            priority: Self::parse_priority(&row.priority)?,
            author_id,
            author,
            image_url: row.image_url,
            published_at: DateTime::from_naive_utc_and_offset(row.published_at, Utc),
            view_count: row.view_count,
            is_deleted: row.is_deleted != 0,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }

    fn parse_category(s: &str) -> Result<Category> {
        match s {
            "Academic" => Ok(Category::Academic),
            "Event" => Ok(Category::Event),
            "Sport" => Ok(Category::Sport),
            "StudentAffairs" => Ok(Category::StudentAffairs),
            "Urgent" => Ok(Category::Urgent),
            "General" => Ok(Category::General),
            "Administrative" => Ok(Category::Administrative),
            _ => Err(AppError::Database(format!("Invalid category: {}", s))),
        }
    }

    pub(crate) fn category_to_str(category: Category) -> &'static str {
        match category {
            Category::Academic => "Academic",
            Category::Event => "Event",
            Category::Sport => "Sport",
            Category::StudentAffairs => "StudentAffairs",
            Category::Urgent => "Urgent",
            Category::General => "General",
            Category::Administrative => "Administrative",
        }
    }

    fn parse_priority(s: &str) -> Result<Priority> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(AppError::Database(format!("Invalid priority: {}", s))),
        }
    }

    fn priority_to_str(priority: Priority) -> &'static str {
        match priority {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    /// Appends the filter's predicates onto a query that already has a
    /// `WHERE a.is_deleted = 0` clause. Category/department/priority are
    /// conjunctive; the search term matches title OR excerpt OR content,
    /// case-insensitively. A blank search term adds no predicate.
    fn push_filter_predicates<'a>(qb: &mut QueryBuilder<'a, Sqlite>, filter: &'a FeedFilter) {
        if let Some(category) = filter.category {
            qb.push(" AND a.category = ");
            qb.push_bind(Self::category_to_str(category));
        }

        if let Some(ref department) = filter.department {
            qb.push(" AND a.department = ");
            qb.push_bind(department.as_str());
        }

        if let Some(priority) = filter.priority {
            qb.push(" AND a.priority = ");
            qb.push_bind(Self::priority_to_str(priority));
        }

        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", search.to_lowercase());
            qb.push(" AND (LOWER(a.title) LIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR LOWER(a.excerpt) LIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR LOWER(a.content) LIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }
    }
}

#[async_trait]
impl AnnouncementRepository for SqliteAnnouncementRepository {
    async fn create(&self, announcement: Announcement) -> Result<Announcement> {
        let id_str = announcement.id.to_string();
        let category_str = Self::category_to_str(announcement.category);
        let priority_str = Self::priority_to_str(announcement.priority);
        let author_id_str = announcement.author_id.to_string();
        let is_deleted_int = if announcement.is_deleted { 1i32 } else { 0i32 };
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO announcements (
                id, title, excerpt, content, category, department, priority,
                author_id, image_url, published_at, view_count, is_deleted,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&announcement.title)
        .bind(&announcement.excerpt)
        .bind(&announcement.content)
        .bind(category_str)
        .bind(&announcement.department)
        .bind(priority_str)
        .bind(&author_id_str)
        .bind(&announcement.image_url)
        .bind(announcement.published_at.naive_utc())
        .bind(announcement.view_count)
        .bind(is_deleted_int)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(announcement.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created announcement".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, AnnouncementRow>(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM announcements a
            LEFT JOIN users u ON u.id = a.author_id
            WHERE a.id = ? AND a.is_deleted = 0
            "#
        ))
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_announcement(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, filter: &FeedFilter) -> Result<Vec<Announcement>> {
        let mut qb = QueryBuilder::new(format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM announcements a
            LEFT JOIN users u ON u.id = a.author_id
            WHERE a.is_deleted = 0
            "#
        ));
        Self::push_filter_predicates(&mut qb, filter);
        qb.push(" ORDER BY a.published_at DESC");

        // A limit alone takes the first rows; an offset requests the
        // half-open range [offset, offset + limit), with the default range
        // size standing in for a missing limit.
        match (filter.limit, filter.offset) {
            (Some(limit), Some(offset)) => {
                qb.push(" LIMIT ");
                qb.push_bind(limit);
                qb.push(" OFFSET ");
                qb.push_bind(offset);
            }
            (Some(limit), None) => {
                qb.push(" LIMIT ");
                qb.push_bind(limit);
            }
            (None, Some(offset)) => {
                qb.push(" LIMIT ");
                qb.push_bind(DEFAULT_RANGE_LIMIT);
                qb.push(" OFFSET ");
                qb.push_bind(offset);
            }
            (None, None) => {}
        }

        let rows = qb
            .build_query_as::<AnnouncementRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_announcement).collect()
    }

    async fn count(&self, filter: &FeedFilter) -> Result<i64> {
        let mut qb =
            QueryBuilder::new("SELECT COUNT(*) FROM announcements a WHERE a.is_deleted = 0");
        Self::push_filter_predicates(&mut qb, filter);

        let count: i64 = qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count)
    }

    async fn list_related(
        &self,
        id: Uuid,
        category: Category,
        department: &str,
        limit: i64,
    ) -> Result<Vec<Announcement>> {
        let id_str = id.to_string();
        let rows = sqlx::query_as::<_, AnnouncementRow>(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM announcements a
            LEFT JOIN users u ON u.id = a.author_id
            WHERE a.is_deleted = 0
              AND a.id != ?
              AND (a.category = ? OR a.department = ?)
            ORDER BY a.published_at DESC
            LIMIT ?
            "#
        ))
        .bind(id_str)
        .bind(Self::category_to_str(category))
        .bind(department)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_announcement).collect()
    }

    async fn update(&self, id: Uuid, announcement: Announcement) -> Result<Announcement> {
        let id_str = id.to_string();
        let category_str = Self::category_to_str(announcement.category);
        let priority_str = Self::priority_to_str(announcement.priority);
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            UPDATE announcements
            SET title = ?, excerpt = ?, content = ?, category = ?,
                department = ?, priority = ?, image_url = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&announcement.title)
        .bind(&announcement.excerpt)
        .bind(&announcement.content)
        .bind(category_str)
        .bind(&announcement.department)
        .bind(priority_str)
        .bind(&announcement.image_url)
        .bind(now)
        .bind(&id_str)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated announcement".to_string())
        })
    }

    async fn soft_delete(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();
        let now = Utc::now().naive_utc();

        sqlx::query("UPDATE announcements SET is_deleted = 1, updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn get_view_count(&self, id: Uuid) -> Result<Option<i64>> {
        let id_str = id.to_string();
        let count: Option<i64> =
            sqlx::query_scalar("SELECT view_count FROM announcements WHERE id = ? AND is_deleted = 0")
                .bind(&id_str)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count)
    }

    async fn set_view_count(&self, id: Uuid, value: i64) -> Result<()> {
        let id_str = id.to_string();
        sqlx::query("UPDATE announcements SET view_count = ? WHERE id = ?")
            .bind(value)
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
