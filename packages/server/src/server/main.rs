// Main entry point for the lead import API server

use std::sync::Arc;

use anyhow::{Context, Result};
use apify_client::ApifyClient;
use leads_core::domains::leads::PostgresLeadListStore;
use leads_core::kernel::{ApifyFollowerScraper, RedisKeyValueStore, ServerDeps};
use leads_core::{server::build_app, Config};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,leads_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting lead import API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Connect to the status store
    let kv = RedisKeyValueStore::connect(&config.redis_url, config.status_ttl_secs).await?;
    tracing::info!(ttl_secs = ?config.status_ttl_secs, "Status store connected");

    let apify = ApifyClient::new(config.apify_api_token)
        .with_twitter_actor(config.apify_twitter_actor);

    let deps = ServerDeps::new(
        Arc::new(PostgresLeadListStore::new(pool)),
        Arc::new(kv),
        Arc::new(ApifyFollowerScraper::new(Arc::new(apify))),
    );

    // Build application
    let app = build_app(deps);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Received shutdown signal");
        })
        .await
        .context("Server error")?;

    Ok(())
}
