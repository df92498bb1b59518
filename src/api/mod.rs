// ============================================================================
// Module : api
// ============================================================================
// Ce module contient les clients API pour récupérer les données de marché
// (historique des prix, liste des cryptos) depuis CoinGecko.
//
// CONCEPT RUST : Trait objet
// - MarketDataSource décrit "ce qu'on attend d'une source de données"
// - Le serveur et le cache reçoivent un Arc<dyn MarketDataSource>
// - Les tests fournissent une implémentation en mémoire (pas de réseau)
// ============================================================================

pub mod coingecko; // Client API CoinGecko

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CoinEntry, PriceSeries};

/// Source de données de marché
///
/// CONCEPT RUST : #[async_trait]
/// - Les fonctions async dans un trait ne sont pas utilisables via `dyn`
/// - La macro les transforme en fonctions retournant une Future boxée
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Historique journalier des prix d'un actif sur la fenêtre configurée
    async fn price_history(&self, coin_id: &str) -> Result<PriceSeries>;

    /// Liste complète des actifs connus (id, nom)
    async fn coin_list(&self) -> Result<Vec<CoinEntry>>;
}

// Re-export du client principal
pub use coingecko::CoinGeckoClient;
