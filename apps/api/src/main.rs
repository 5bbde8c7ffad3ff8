mod analysis;
mod catalog;
mod config;
mod db;
mod errors;
mod models;
mod resume;
mod routes;
mod sessions;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::{CatalogSource, PgCatalogSource, SeedCatalogSource};
use crate::config::Config;
use crate::db::create_pool;
use crate::resume::handlers::prune_downloads;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on unparseable env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerPath API v{}", env!("CARGO_PKG_VERSION"));

    // Catalog: PostgreSQL when DATABASE_URL is set, built-in tables otherwise
    let source: Box<dyn CatalogSource> = match &config.database_url {
        Some(url) => Box::new(PgCatalogSource::new(create_pool(url).await?)),
        None => Box::new(SeedCatalogSource),
    };
    let catalog = source
        .load()
        .await
        .with_context(|| format!("Failed to load catalog from {} source", source.name()))?;
    info!(
        "Catalog ready ({}): {} skills, {} careers",
        source.name(),
        catalog.skills().len(),
        catalog.careers().len()
    );

    tokio::fs::create_dir_all(&config.downloads_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create downloads directory {}",
                config.downloads_dir.display()
            )
        })?;
    let pruned = prune_downloads(&config.downloads_dir, config.download_max_age)
        .await
        .context("Failed to clean up downloads directory")?;
    info!(
        "Serving generated resumes from {} ({pruned} expired files removed)",
        config.downloads_dir.display()
    );

    let port = config.port;
    let state = AppState::new(catalog, config);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
