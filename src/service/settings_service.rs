use std::collections::HashMap;

use chrono::Utc;
use sqlx::SqlitePool;
use tokio::sync::{watch, RwLock};

use crate::error::{AppError, Result};

/// Default theme when nothing has been persisted yet.
const DEFAULT_THEME: &str = "light";

pub const THEME_KEY: &str = "theme";

/// Process-wide runtime settings (theme and similar UI-facing defaults).
/// Loaded from storage exactly once at startup; every mutation goes
/// through [`SettingsService::set`], which persists, updates the cache,
/// and notifies subscribers. There is no ambient mutable global.
pub struct SettingsService {
    pool: SqlitePool,
    cache: RwLock<HashMap<String, String>>,
    notify: watch::Sender<HashMap<String, String>>,
}

impl SettingsService {
    pub async fn load(pool: SqlitePool) -> Result<Self> {
        let rows: Vec<(String, String)> = sqlx::query_as("SELECT key, value FROM app_settings")
            .fetch_all(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let map: HashMap<String, String> = rows.into_iter().collect();
        let (notify, _) = watch::channel(map.clone());

        Ok(Self {
            pool,
            cache: RwLock::new(map),
            notify,
        })
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.cache.read().await.get(key).cloned()
    }

    pub async fn all(&self) -> HashMap<String, String> {
        self.cache.read().await.clone()
    }

    pub async fn theme(&self) -> String {
        self.get(THEME_KEY)
            .await
            .unwrap_or_else(|| DEFAULT_THEME.to_string())
    }

    /// Persists the new value, then updates the in-process cache and
    /// notifies watchers with the full snapshot.
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now().naive_utc();
        sqlx::query(
            r#"
            INSERT INTO app_settings (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        let mut cache = self.cache.write().await;
        cache.insert(key.to_string(), value.to_string());
        let _ = self.notify.send(cache.clone());

        Ok(())
    }

    pub fn subscribe(&self) -> watch::Receiver<HashMap<String, String>> {
        self.notify.subscribe()
    }
}
