// ============================================================================
// Module : server
// ============================================================================
// Serveur HTTP (axum) : état partagé, routes et démarrage
//
// CONCEPT RUST : Arc<AppState>
// - Un seul état partagé entre toutes les requêtes (clone = compteur +1)
// - Chaque composant est un trait objet : remplaçable dans les tests
// ============================================================================

pub mod handlers;
pub mod page;

use std::sync::Arc;

use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{CoinGeckoClient, MarketDataSource};
use crate::catalog::{CatalogCache, FileStore, SystemClock};
use crate::chart::{ChartRenderer, PlottersRenderer};
use crate::config::Config;

/// État partagé par les handlers
pub struct AppState {
    pub market: Arc<dyn MarketDataSource>,
    pub catalog: CatalogCache,
    pub renderer: Arc<dyn ChartRenderer>,
}

impl AppState {
    /// Assemble les composants de production à partir de la configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let market: Arc<dyn MarketDataSource> = Arc::new(
            CoinGeckoClient::new(config).context("Échec de la création du client CoinGecko")?,
        );

        let cache_path = config.cache_path();
        info!(cache = %cache_path.display(), ttl_hours = config.cache_ttl_hours, "Catalog cache configured");

        let catalog = CatalogCache::new(
            Arc::clone(&market),
            Arc::new(FileStore::new(cache_path)),
            Arc::new(SystemClock),
            config.cache_ttl(),
        );

        Ok(Self {
            market,
            catalog,
            renderer: Arc::new(PlottersRenderer::default()),
        })
    }
}

/// Construit le Router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/predict", post(handlers::predict))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Démarre le serveur et bloque jusqu'à l'arrêt (Ctrl+C)
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let state = Arc::new(AppState::from_config(config)?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Impossible d'écouter sur {}", config.bind))?;
    info!(addr = %config.bind, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Erreur du serveur HTTP")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        // Sans signal, on ne s'arrête jamais de soi-même
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

// ============================================================================
// Tests : le Router complet, sans réseau ni police (oneshot)
// ============================================================================
