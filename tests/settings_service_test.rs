mod common;

use herald::service::settings_service::THEME_KEY;
use herald::service::SettingsService;

#[tokio::test]
async fn defaults_apply_until_a_value_is_persisted() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let service = SettingsService::load(pool).await?;

    assert_eq!(service.theme().await, "light");
    assert!(service.get(THEME_KEY).await.is_none());

    Ok(())
}

#[tokio::test]
async fn mutations_persist_and_notify_subscribers() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let service = SettingsService::load(pool.clone()).await?;

    let mut rx = service.subscribe();

    service.set(THEME_KEY, "dark").await?;

    rx.changed().await?;
    assert_eq!(
        rx.borrow().get(THEME_KEY).map(String::as_str),
        Some("dark")
    );
    assert_eq!(service.theme().await, "dark");

    // A fresh init-from-storage sees the persisted value, not just the
    // in-process cache.
    let reloaded = SettingsService::load(pool).await?;
    assert_eq!(reloaded.theme().await, "dark");

    Ok(())
}

#[tokio::test]
async fn set_overwrites_an_existing_key() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let service = SettingsService::load(pool).await?;

    service.set("banner", "Welcome week").await?;
    service.set("banner", "Exam period").await?;

    assert_eq!(service.get("banner").await.as_deref(), Some("Exam period"));
    assert_eq!(service.all().await.len(), 1);

    Ok(())
}
