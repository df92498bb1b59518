// ============================================================================
// Module : predictor
// ============================================================================
// Prédit le prix d'une crypto à une date donnée par régression linéaire
//
// Algorithme :
// 1. Origine = timestamp le plus ancien de la série
// 2. Feature = nombre de jours entiers depuis l'origine (day-offset)
// 3. Ajustement des moindres carrés : prix ~ day-offset
// 4. Évaluation de la droite au day-offset de la date cible
// ============================================================================

pub mod regression;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, instrument};

use crate::error::{PredictError, Result};
use crate::models::PriceSeries;

pub use regression::LinearRegression;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Nombre de jours entiers entre `origin` et `instant`
///
/// CONCEPT : Division euclidienne
/// - Arrondi vers -∞ : 23h avant l'origine donne -1, pas 0
/// - Cohérent pour les dates cibles antérieures à la série
pub fn day_offset(origin: DateTime<Utc>, instant: DateTime<Utc>) -> i64 {
    (instant - origin).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Minuit UTC de la date cible
pub fn target_instant(target: NaiveDate) -> DateTime<Utc> {
    target.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Ajuste la régression sur la série (feature = day-offset)
///
/// Renvoie aussi l'origine utilisée pour les day-offsets : une prédiction
/// doit mesurer la date cible depuis la même origine.
pub fn fit_series(series: &PriceSeries) -> Result<(LinearRegression, DateTime<Utc>)> {
    let origin = series
        .origin()
        .ok_or_else(|| PredictError::Fit("empty price series".to_string()))?;

    let (days, prices): (Vec<f64>, Vec<f64>) = series
        .points()
        .iter()
        .map(|p| (day_offset(origin, p.timestamp) as f64, p.price))
        .unzip();

    let model = LinearRegression::fit(&days, &prices)?;
    Ok((model, origin))
}

/// Prédit le prix à la date cible (passée, présente ou future)
#[instrument(skip(series), fields(coin = %series.coin_id, points = series.len()))]
pub fn predict_price(series: &PriceSeries, target: NaiveDate) -> Result<f64> {
    let (model, origin) = fit_series(series)?;
    let target_day = day_offset(origin, target_instant(target));
    let predicted = model.predict(target_day as f64);

    debug!(
        slope = model.slope(),
        intercept = model.intercept(),
        target_day,
        predicted,
        "Fitted linear model"
    );

    if !predicted.is_finite() {
        return Err(PredictError::Fit(format!(
            "non-finite prediction at day {}",
            target_day
        )));
    }
    Ok(predicted)
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PricePoint;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        // Les timestamps CoinGecko "daily" tombent à minuit UTC
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    }

    /// Série croissante : prix = 100 + 5 * jour (+ léger bruit alterné)
    fn rising_series(days: i64) -> PriceSeries {
        let points = (0..days)
            .map(|d| {
                let noise = if d % 2 == 0 { 0.5 } else { -0.5 };
                PricePoint::new(start() + Duration::days(d), 100.0 + 5.0 * d as f64 + noise)
            })
            .collect();
        PriceSeries::from_points("bitcoin".to_string(), points)
    }

    #[test]
    fn test_day_offset_floors() {
        let origin = start();
        assert_eq!(day_offset(origin, origin), 0);
        assert_eq!(day_offset(origin, origin + Duration::hours(47)), 1);
        assert_eq!(day_offset(origin, origin + Duration::days(10)), 10);
        assert_eq!(day_offset(origin, origin - Duration::hours(1)), -1);
    }

    #[test]
    fn test_fitted_endpoints() {
        let series = rising_series(31);
        let (model, origin) = fit_series(&series).unwrap();
        assert_eq!(Some(origin), series.origin());

        assert_eq!(model.predict(0.0), model.intercept());
        let end = model.predict(30.0);
        assert!((end - (model.intercept() + 30.0 * model.slope())).abs() < 1e-9);
        assert!((model.slope() - 5.0).abs() < 0.1);
    }

    #[test]
    fn test_target_on_last_day_close_to_last_price() {
        let series = rising_series(30);
        let last = *series.last().unwrap();

        let predicted = predict_price(&series, last.timestamp.date_naive()).unwrap();
        assert!((predicted - last.price).abs() < 1.0);
    }

    #[test]
    fn test_target_inside_range_is_between_min_and_max() {
        let series = rising_series(30);
        let target = (start() + Duration::days(10)).date_naive();

        let predicted = predict_price(&series, target).unwrap();
        let min = series.min_price().unwrap();
        let max = series.max_price().unwrap();
        assert!(predicted > min && predicted < max);
    }

    #[test]
    fn test_future_target_extrapolates() {
        let series = rising_series(30);
        let target = (start() + Duration::days(60)).date_naive();

        let predicted = predict_price(&series, target).unwrap();
        assert!(predicted > series.max_price().unwrap());
    }

    #[test]
    fn test_past_target_before_origin() {
        let series = rising_series(30);
        let target = (start() - Duration::days(5)).date_naive();

        let predicted = predict_price(&series, target).unwrap();
        assert!(predicted < series.min_price().unwrap());
    }

    #[test]
    fn test_single_point_series_is_flat() {
        let series = PriceSeries::from_points(
            "bitcoin".to_string(),
            vec![PricePoint::new(start(), 64_000.0)],
        );
        let target = (start() + Duration::days(100)).date_naive();
        assert_eq!(predict_price(&series, target).unwrap(), 64_000.0);
    }

    #[test]
    fn test_empty_series_is_fit_error() {
        let series = PriceSeries::new("bitcoin".to_string());
        let err = predict_price(&series, start().date_naive()).unwrap_err();
        assert!(matches!(err, PredictError::Fit(_)));
    }
}
