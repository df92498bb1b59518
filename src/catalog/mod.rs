// ============================================================================
// Module : catalog
// ============================================================================
// Cache de la liste des cryptos connues (id, nom), rafraîchi toutes les 24h
//
// CONCEPTS RUST :
// 1. Injection de dépendances : source, stockage et horloge sont des traits
// 2. tokio::sync::Mutex : un seul rafraîchissement à la fois (pas de double
//    fetch ni de lecture d'un fichier en cours d'écriture)
// 3. Dégradation silencieuse : une erreur réseau donne une liste vide
// 4. spawn_blocking : le stockage (std::fs) tourne hors des workers tokio
// ============================================================================

pub mod clock;
pub mod store;

use std::sync::Arc;

use chrono::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::api::MarketDataSource;
use crate::models::CoinEntry;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{CacheRecord, CatalogError, CatalogStore, FileStore, MemoryStore};

/// Cache du catalogue
pub struct CatalogCache {
    source: Arc<dyn MarketDataSource>,
    store: Arc<dyn CatalogStore>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    /// Sérialise lecture + rafraîchissement
    lock: Mutex<()>,
}

impl CatalogCache {
    pub fn new(
        source: Arc<dyn MarketDataSource>,
        store: Arc<dyn CatalogStore>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
    ) -> Self {
        Self {
            source,
            store,
            clock,
            ttl,
            lock: Mutex::new(()),
        }
    }

    async fn load_record(&self) -> Result<Option<CacheRecord>, CatalogError> {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || store.load()).await?
    }

    async fn save_record(&self, record: CacheRecord) -> Result<(), CatalogError> {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || store.save(&record)).await?
    }

    /// Retourne le catalogue (depuis le cache s'il est encore frais)
    ///
    /// Ne retourne jamais d'erreur : si l'API échoue, la liste est vide et
    /// l'enregistrement existant n'est pas modifié.
    #[instrument(skip(self))]
    pub async fn coins(&self) -> Vec<CoinEntry> {
        let _guard = self.lock.lock().await;
        let now = self.clock.now();

        match self.load_record().await {
            Ok(Some(record)) if record.is_fresh(now, self.ttl) => {
                debug!(coins = record.coins.len(), fetched_at = %record.fetched_at, "Catalog cache hit");
                return record.coins;
            }
            Ok(Some(record)) => {
                debug!(fetched_at = %record.fetched_at, "Catalog cache expired");
            }
            Ok(None) => debug!("Catalog cache empty"),
            Err(e) => warn!(error = %e, "Failed to read catalog cache"),
        }

        let coins = match self.source.coin_list().await {
            Ok(coins) => coins,
            Err(e) => {
                warn!(error = %e, "Coin list unavailable, serving empty catalog");
                return Vec::new();
            }
        };

        let record = CacheRecord::new(coins.clone(), now);
        if let Err(e) = self.save_record(record).await {
            warn!(error = %e, "Failed to persist catalog cache");
        }

        info!(coins = coins.len(), "Catalog refreshed");
        coins
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
