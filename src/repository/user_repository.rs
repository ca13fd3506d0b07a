use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Role, UserProfile, UserQuery, UserStats},
    error::{AppError, Result},
    repository::UserRepository,
};

/// Directory searches are capped the way the original search box was.
const SEARCH_LIMIT: i64 = 20;

#[derive(FromRow)]
struct UserRow {
    id: String,
    email: String,
    name: String,
    first_name: Option<String>,
    last_name: Option<String>,
    role: String,
    department: String,
    level: Option<String>,
    avatar: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: UserRow) -> Result<UserProfile> {
        Ok(UserProfile {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            email: row.email,
            name: row.name,
            first_name: row.first_name,
            last_name: row.last_name,
            role: Self::parse_role(&row.role)?,
            department: row.department,
            level: row.level,
            avatar: row.avatar,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }

    fn parse_role(s: &str) -> Result<Role> {
        match s {
            "student" => Ok(Role::Student),
            "lecturer" => Ok(Role::Lecturer),
            "admin" => Ok(Role::Admin),
            _ => Err(AppError::Database(format!("Invalid role: {}", s))),
        }
    }

    pub(crate) fn role_to_str(role: Role) -> &'static str {
        match role {
            Role::Student => "student",
            Role::Lecturer => "lecturer",
            Role::Admin => "admin",
        }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: UserProfile) -> Result<UserProfile> {
        let id_str = user.id.to_string();
        let role_str = Self::role_to_str(user.role);
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, name, first_name, last_name, role, department,
                level, avatar, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(role_str)
        .bind(&user.department)
        .bind(&user.level)
        .bind(&user.avatar)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(user.id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created user".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, name, first_name, last_name, role, department,
                   level, avatar, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_user(r)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, id: Uuid, user: UserProfile) -> Result<UserProfile> {
        let id_str = id.to_string();
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            UPDATE users
            SET name = ?, first_name = ?, last_name = ?, department = ?,
                level = ?, avatar = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.name)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.department)
        .bind(&user.level)
        .bind(&user.avatar)
        .bind(now)
        .bind(&id_str)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve updated user".to_string()))
    }

    async fn list(&self, query: &UserQuery) -> Result<Vec<UserProfile>> {
        let mut qb = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT id, email, name, first_name, last_name, role, department,
                   level, avatar, created_at, updated_at
            FROM users
            WHERE 1 = 1
            "#,
        );

        if let Some(role) = query.role {
            qb.push(" AND role = ");
            qb.push_bind(Self::role_to_str(role));
        }

        if let Some(ref department) = query.department {
            qb.push(" AND department = ");
            qb.push_bind(department.as_str());
        }

        if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", search.to_lowercase());
            qb.push(" AND (LOWER(name) LIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR LOWER(email) LIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }

        qb.push(" ORDER BY name ASC LIMIT ");
        qb.push_bind(query.limit.unwrap_or(SEARCH_LIMIT));

        let rows = qb
            .build_query_as::<UserRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_user).collect()
    }

    async fn stats(&self) -> Result<UserStats> {
        let (total, students, lecturers, admins): (i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COALESCE(SUM(CASE WHEN role = 'student' THEN 1 ELSE 0 END), 0),
                   COALESCE(SUM(CASE WHEN role = 'lecturer' THEN 1 ELSE 0 END), 0),
                   COALESCE(SUM(CASE WHEN role = 'admin' THEN 1 ELSE 0 END), 0)
            FROM users
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(UserStats {
            total,
            students,
            lecturers,
            admins,
        })
    }
}
