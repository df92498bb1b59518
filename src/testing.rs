// Doublures partagées par les tests des modules catalog et server

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::api::MarketDataSource;
use crate::chart::{ChartRenderer, ChartRequest};
use crate::error::{PredictError, Result};
use crate::models::{CoinEntry, PricePoint, PriceSeries};

pub fn series_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
}

/// 30 jours de prix croissants : 100, 110, 120, ...
pub fn rising_series(coin_id: &str) -> PriceSeries {
    PriceSeries::from_points(
        coin_id.to_string(),
        (0..30)
            .map(|d| PricePoint::new(series_start() + Duration::days(d), 100.0 + 10.0 * d as f64))
            .collect(),
    )
}

/// Source de marché en mémoire qui compte ses appels
pub struct FakeMarket {
    pub coins: Option<Vec<CoinEntry>>,
    pub known_coin: String,
    pub coin_list_calls: AtomicUsize,
    pub history_calls: AtomicUsize,
}

impl FakeMarket {
    pub fn new() -> Self {
        Self {
            coins: Some(vec![
                CoinEntry::new("bitcoin", "Bitcoin"),
                CoinEntry::new("ethereum", "Ethereum"),
            ]),
            known_coin: "bitcoin".to_string(),
            coin_list_calls: AtomicUsize::new(0),
            history_calls: AtomicUsize::new(0),
        }
    }

    /// /coins/list renvoie une erreur HTTP
    pub fn failing_catalog() -> Self {
        Self {
            coins: None,
            ..Self::new()
        }
    }

    pub fn coin_list_calls(&self) -> usize {
        self.coin_list_calls.load(Ordering::SeqCst)
    }

    pub fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataSource for FakeMarket {
    async fn price_history(&self, coin_id: &str) -> Result<PriceSeries> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        if coin_id == self.known_coin {
            Ok(rising_series(coin_id))
        } else {
            Err(PredictError::DataUnavailable(
                "CoinGecko returned HTTP 404 Not Found".to_string(),
            ))
        }
    }

    async fn coin_list(&self) -> Result<Vec<CoinEntry>> {
        self.coin_list_calls.fetch_add(1, Ordering::SeqCst);
        // Laisse la main : rend visibles les accès concurrents
        tokio::task::yield_now().await;
        self.coins.clone().ok_or_else(|| {
            PredictError::DataUnavailable("CoinGecko returned HTTP 429 Too Many Requests".to_string())
        })
    }
}

/// Rendu factice : quelques octets d'en-tête PNG, sans police ni fichier
pub struct StubRenderer;

impl ChartRenderer for StubRenderer {
    fn render(&self, _request: &ChartRequest) -> Result<Vec<u8>> {
        Ok(vec![0x89, b'P', b'N', b'G'])
    }
}

/// Rendu qui échoue toujours
pub struct FailingRenderer;

impl ChartRenderer for FailingRenderer {
    fn render(&self, _request: &ChartRequest) -> Result<Vec<u8>> {
        Err(PredictError::Render("no fonts available".to_string()))
    }
}
