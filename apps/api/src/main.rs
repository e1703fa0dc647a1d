use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{self, TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use directory_cell::services::{CatalogSource, JsonFileCatalog, ProviderDirectory, SeedCatalog};
use shared_config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting healthcare kiosk API server");

    // Load configuration
    let config = AppConfig::from_env();

    // Load the provider catalog once; every request reads the same snapshot
    let source: Box<dyn CatalogSource> = match &config.catalog_path {
        Some(path) => Box::new(JsonFileCatalog::new(path)),
        None => Box::new(SeedCatalog),
    };
    let directory = ProviderDirectory::from_source(source.as_ref())
        .with_context(|| format!("loading provider catalog from {}", source.describe()))?;

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the application router
    let app = router::create_router(&config, Arc::new(directory))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors);

    // Run the server
    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
