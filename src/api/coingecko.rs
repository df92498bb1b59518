// ============================================================================
// API Client : CoinGecko
// ============================================================================
// Récupère l'historique des prix et la liste des cryptos depuis CoinGecko
//
// CONCEPTS RUST :
// 1. async/await : programmation asynchrone (non-bloquante)
// 2. Result<T, E> : erreurs typées (PredictError::DataUnavailable)
// 3. Serde : désérialisation JSON automatique
// ============================================================================

use anyhow::Context;
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

use crate::api::MarketDataSource;
use crate::config::Config;
use crate::error::{PredictError, Result};
use crate::models::{CoinEntry, PricePoint, PriceSeries};

// ============================================================================
// Structures pour parser les réponses JSON de CoinGecko
// ============================================================================
// /coins/{id}/market_chart renvoie des tableaux [timestamp_ms, valeur] :
//   {"prices": [[1704067200000, 42000.5], ...], "market_caps": [...], ...}
// ============================================================================

/// Réponse de /coins/{id}/market_chart (seuls les prix nous intéressent)
#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<MarketData>,
}

/// Un couple (timestamp en millisecondes, valeur)
#[derive(Debug, Deserialize)]
struct MarketData(i64, f64);

/// Élément de /coins/list (les autres champs comme "symbol" sont ignorés)
#[derive(Debug, Deserialize)]
struct CoinListItem {
    id: String,
    name: String,
}

// ============================================================================
// Client
// ============================================================================

/// Client HTTP CoinGecko
///
/// CONCEPT RUST : reqwest::Client
/// - Contient un pool de connexions : on le crée une fois et on le réutilise
/// - Clone est bon marché (Arc interne)
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: reqwest::Client,
    api_base: String,
    vs_currency: String,
    lookback_days: u32,
}

impl CoinGeckoClient {
    /// Crée le client à partir de la configuration
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("lazypredict/", env!("CARGO_PKG_VERSION")))
            .timeout(config.http_timeout())
            .build()
            .context("Échec de la création du client HTTP")?;

        // Valide l'URL de base dès le démarrage
        Url::parse(&config.api_base)
            .with_context(|| format!("URL d'API invalide : {}", config.api_base))?;

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            vs_currency: config.vs_currency.clone(),
            lookback_days: config.lookback_days,
        })
    }

    /// Construit une URL sous la base de l'API
    ///
    /// CONCEPT : path_segments_mut
    /// - Chaque segment est encodé (un id contenant "/" ou "?" reste un seul segment)
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| PredictError::DataUnavailable(format!("bad api base: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| PredictError::DataUnavailable("api base cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// URL de l'historique : /coins/{id}/market_chart?vs_currency=usd&days=30&interval=daily
    fn market_chart_url(&self, coin_id: &str) -> Result<Url> {
        let mut url = self.endpoint(&["coins", coin_id, "market_chart"])?;
        url.query_pairs_mut()
            .append_pair("vs_currency", &self.vs_currency)
            .append_pair("days", &self.lookback_days.to_string())
            .append_pair("interval", "daily");
        Ok(url)
    }

    /// Envoie un GET et vérifie le statut HTTP
    async fn get(&self, url: Url) -> Result<reqwest::Response> {
        debug!(url = %url, "Sending HTTP request to CoinGecko");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        // Vérifie que la réponse est un succès HTTP (200-299)
        if !status.is_success() {
            error!(status = %status, "CoinGecko returned error status");
            return Err(PredictError::DataUnavailable(format!(
                "CoinGecko returned HTTP {}",
                status
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl MarketDataSource for CoinGeckoClient {
    /// Récupère l'historique journalier d'une crypto
    ///
    /// CONCEPT RUST : #[instrument]
    /// - Ajoute un span avec le coin_id à tous les logs de la fonction
    #[instrument(skip(self))]
    async fn price_history(&self, coin_id: &str) -> Result<PriceSeries> {
        let url = self.market_chart_url(coin_id)?;
        let response = self.get(url).await?;

        debug!("Parsing JSON response");
        let body: MarketChartResponse = response.json().await?;

        let series = parse_market_chart(body, coin_id)?;
        info!(points = series.len(), "Successfully fetched price history");
        Ok(series)
    }

    #[instrument(skip(self))]
    async fn coin_list(&self) -> Result<Vec<CoinEntry>> {
        let url = self.endpoint(&["coins", "list"])?;
        let response = self.get(url).await?;

        let items: Vec<CoinListItem> = response.json().await?;
        let coins: Vec<CoinEntry> = items
            .into_iter()
            .map(|item| CoinEntry::new(item.id, item.name))
            .collect();

        info!(coins = coins.len(), "Fetched coin list");
        Ok(coins)
    }
}

/// Convertit la réponse market_chart en PriceSeries
///
/// CONCEPT RUST : Ownership
/// - body est "moved" : on consomme les vecteurs sans copie
fn parse_market_chart(body: MarketChartResponse, coin_id: &str) -> Result<PriceSeries> {
    let total = body.prices.len();
    let mut skipped = 0;

    let points: Vec<PricePoint> = body
        .prices
        .into_iter()
        .filter_map(|MarketData(ms, price)| {
            match DateTime::from_timestamp_millis(ms) {
                Some(ts) if price.is_finite() => Some(PricePoint::new(ts, price)),
                _ => {
                    skipped += 1;
                    None
                }
            }
        })
        .collect();

    if skipped > 0 {
        warn!(skipped, total, "Skipped invalid price points");
    }

    if points.is_empty() {
        error!("No valid price data found");
        return Err(PredictError::DataUnavailable(format!(
            "no price data returned for {}",
            coin_id
        )));
    }

    Ok(PriceSeries::from_points(coin_id.to_string(), points))
}

// ============================================================================
// Tests unitaires
// ============================================================================
