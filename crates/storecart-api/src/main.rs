//! Storecart API server entry point.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use storecart_api::config::{AppConfig, CartStorageConfig};
use storecart_api::error::AppError;
use storecart_api::state::AppState;
use storecart_cart::CartManager;
use storecart_core::clock::SystemClock;
use storecart_core::store::CartStore;
use storecart_gateway::HttpInventoryGateway;
use storecart_store::schema::ensure_schema;
use storecart_store::{FileCartStore, PgCartStore};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting storecart API server");

    let config = AppConfig::from_env()?;

    let store: Arc<dyn CartStore> = match &config.storage {
        CartStorageConfig::Postgres(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;
            ensure_schema(&pool).await?;
            tracing::info!("Using PostgreSQL cart store");
            Arc::new(PgCartStore::new(pool))
        }
        CartStorageConfig::File(dir) => {
            let store = FileCartStore::new(dir);
            tracing::info!(dir = %store.dir().display(), "Using file cart store");
            Arc::new(store)
        }
    };

    let gateway = HttpInventoryGateway::new(&config.inventory_api_url, config.inventory_timeout)?;
    tracing::info!(base_url = gateway.base_url(), "Inventory gateway configured");

    let cart_manager = CartManager::load(Arc::new(gateway), store, Arc::new(SystemClock)).await;
    let app_state = AppState::new(Arc::new(cart_manager));

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = storecart_api::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.socket_addr();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
