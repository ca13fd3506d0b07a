use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use herald::{
    api,
    config::Settings,
    feed::FeedStatsPoller,
    repository::{SqliteAnnouncementRepository, SqliteUserRepository},
    service::{ServiceContext, SettingsService},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "herald=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = Settings::new().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        Settings::default()
    });

    tracing::info!(
        "Starting Herald server on {}:{}",
        settings.server.host,
        settings.server.port
    );

    // Initialize database
    let db_pool = SqlitePoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(&settings.database.url)
        .await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    // Initialize repositories
    let announcement_repo = Arc::new(SqliteAnnouncementRepository::new(db_pool.clone()));
    let user_repo = Arc::new(SqliteUserRepository::new(db_pool.clone()));

    // Runtime settings are loaded from storage once, then mutated only
    // through the service (which notifies subscribers).
    let settings_service = Arc::new(SettingsService::load(db_pool.clone()).await?);

    // Create service context
    let service_context = Arc::new(ServiceContext::new(
        announcement_repo,
        user_repo,
        settings_service,
        &settings.feed,
        db_pool.clone(),
    ));

    // Background poller publishing feed totals for /api/stats
    let stats_poller = Arc::new(FeedStatsPoller::spawn(
        service_context.feed.clone(),
        Duration::from_secs(settings.feed.stats_poll_interval_secs),
    ));

    let app = api::create_app(
        service_context,
        stats_poller.clone(),
        Arc::new(settings.clone()),
    );

    let listener = tokio::net::TcpListener::bind(format!(
        "{}:{}",
        settings.server.host, settings.server.port
    ))
    .await?;

    tracing::info!(
        "Server listening on http://{}:{}",
        settings.server.host,
        settings.server.port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    stats_poller.cancel();

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}
