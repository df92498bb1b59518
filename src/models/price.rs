// ============================================================================
// Structure : PriceSeries
// ============================================================================
// Représente l'historique des prix d'une crypto (un point par jour)
//
// CONCEPTS RUST :
// 1. DateTime<Utc> : type de chrono pour dates avec timezone UTC
// 2. f64 : floating point 64 bits pour les prix (précision suffisante)
// 3. Vec<T> : la série possède tous ses points
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Un point de prix : (timestamp, prix)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Instant de la mesure
    pub timestamp: DateTime<Utc>,

    /// Prix dans la devise de cotation (usd par défaut)
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Série de prix pour un actif, triée par timestamp croissant
///
/// CONCEPT RUST : Encapsulation
/// - Le Vec est privé : on ne peut construire la série que via
///   `from_points` ou `push`, qui maintiennent l'ordre croissant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Identifiant de l'actif (ex: "bitcoin")
    pub coin_id: String,

    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Crée une série vide
    pub fn new(coin_id: String) -> Self {
        Self {
            coin_id,
            points: Vec::new(),
        }
    }

    /// Crée une série à partir de points dans n'importe quel ordre
    ///
    /// CONCEPT RUST : sort_by_key
    /// - Tri stable : deux points au même instant gardent leur ordre d'origine
    pub fn from_points(coin_id: String, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        Self { coin_id, points }
    }

    /// Ajoute un point en conservant l'ordre croissant
    pub fn push(&mut self, point: PricePoint) {
        // Cas courant : l'API renvoie déjà les points dans l'ordre
        let in_order = self
            .points
            .last()
            .map_or(true, |last| last.timestamp <= point.timestamp);

        self.points.push(point);
        if !in_order {
            self.points.sort_by_key(|p| p.timestamp);
        }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Origine de l'axe des jours : le timestamp le plus ancien
    pub fn origin(&self) -> Option<DateTime<Utc>> {
        self.first().map(|p| p.timestamp)
    }

    /// Prix minimum sur toute la période
    ///
    /// CONCEPT RUST : fold
    /// - Pas de partial_cmp().unwrap() : un NaN ne fait pas paniquer
    pub fn min_price(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.points.iter().map(|p| p.price).fold(f64::INFINITY, f64::min))
    }

    /// Prix maximum sur toute la période
    pub fn max_price(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(
            self.points
                .iter()
                .map(|p| p.price)
                .fold(f64::NEG_INFINITY, f64::max),
        )
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(n)
    }

    #[test]
    fn test_from_points_sorts_ascending() {
        let series = PriceSeries::from_points(
            "bitcoin".to_string(),
            vec![
                PricePoint::new(day(2), 30.0),
                PricePoint::new(day(0), 10.0),
                PricePoint::new(day(1), 20.0),
            ],
        );

        let prices: Vec<f64> = series.points().iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![10.0, 20.0, 30.0]);
        assert_eq!(series.origin(), Some(day(0)));
    }

    #[test]
    fn test_push_out_of_order() {
        let mut series = PriceSeries::new("eth".to_string());
        series.push(PricePoint::new(day(5), 50.0));
        series.push(PricePoint::new(day(1), 10.0));

        assert_eq!(series.first().unwrap().price, 10.0);
        assert_eq!(series.last().unwrap().price, 50.0);
    }

    #[test]
    fn test_min_max_price() {
        let mut series = PriceSeries::new("bitcoin".to_string());
        assert_eq!(series.min_price(), None);

        series.push(PricePoint::new(day(0), 42.0));
        series.push(PricePoint::new(day(1), 12.5));
        series.push(PricePoint::new(day(2), 99.0));

        assert_eq!(series.min_price(), Some(12.5));
        assert_eq!(series.max_price(), Some(99.0));
        assert_eq!(series.len(), 3);
    }
}
