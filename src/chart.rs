// ============================================================================
// Chart - Rendu du graphique de prédiction
// ============================================================================
// Dessine l'historique des prix, une ligne verticale à la date cible et le
// point prédit, puis renvoie l'image PNG en octets.
//
// CONCEPTS PLOTTERS :
// 1. BitMapBackend : rendu dans un fichier image
// 2. ChartBuilder : axes (x = dates, y = prix)
// 3. Series : ligne des prix, ligne pointillée, annotation
// ============================================================================

use std::fs;
use std::ops::Range;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use plotters::prelude::*;
use tracing::debug;

use crate::error::{PredictError, Result};
use crate::models::{CoinEntry, PriceSeries};
use crate::predictor::target_instant;

pub const CHART_WIDTH: u32 = 1000;
pub const CHART_HEIGHT: u32 = 600;

/// Données nécessaires pour dessiner un graphique
///
/// CONCEPT RUST : Ownership
/// - La requête possède ses données pour pouvoir être déplacée dans
///   tokio::task::spawn_blocking (qui exige 'static)
#[derive(Debug, Clone)]
pub struct ChartRequest {
    pub series: PriceSeries,
    pub target: NaiveDate,
    pub predicted_price: f64,
}

/// Produit l'image PNG d'une prédiction
pub trait ChartRenderer: Send + Sync {
    fn render(&self, request: &ChartRequest) -> Result<Vec<u8>>;
}

/// Rendu avec plotters
#[derive(Debug, Clone, Copy)]
pub struct PlottersRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for PlottersRenderer {
    fn default() -> Self {
        Self {
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
        }
    }
}

/// Bornes des axes : elles couvrent à la fois la série et le point prédit
///
/// - X : de min(origine, cible) à max(dernier point, cible) + 1 jour pour le label
/// - Y : min/max des prix et de la prédiction, avec 10% de marge
pub fn axis_ranges(
    series: &PriceSeries,
    target: DateTime<Utc>,
    predicted_price: f64,
) -> Option<(Range<DateTime<Utc>>, Range<f64>)> {
    let first = series.first()?.timestamp;
    let last = series.last()?.timestamp;

    let x_min = first.min(target);
    // None si la date dépasse la limite de chrono
    let x_max = last.max(target).checked_add_signed(Duration::days(1))?;

    let min_price = series.min_price()?.min(predicted_price);
    let max_price = series.max_price()?.max(predicted_price);
    // Évite un axe de hauteur nulle (série plate)
    let price_range = (max_price - min_price).max(1e-8);
    let padding = price_range * 0.1;

    Some((x_min..x_max, (min_price - padding)..(max_price + padding)))
}

const DASH_COUNT: usize = 30;

/// Tirets de la ligne verticale : DASH_COUNT tirets séparés par des vides
/// de même longueur, de `from` à `to`
fn dash_segments(from: f64, to: f64) -> impl Iterator<Item = (f64, f64)> {
    let step = (to - from) / (DASH_COUNT * 2 - 1) as f64;
    (0..DASH_COUNT).map(move |i| {
        let start = from + step * (2 * i) as f64;
        (start, start + step)
    })
}

impl ChartRenderer for PlottersRenderer {
    fn render(&self, request: &ChartRequest) -> Result<Vec<u8>> {
        let series = &request.series;
        let target = target_instant(request.target);
        let predicted = request.predicted_price;

        let (x_range, y_range) = axis_ranges(series, target, predicted)
            .ok_or_else(|| PredictError::Render("empty price series".to_string()))?;
        let (y_min, y_max) = (y_range.start, y_range.end);

        // BitMapBackend écrit dans un fichier : on passe par un fichier
        // temporaire supprimé automatiquement (Drop de NamedTempFile)
        let temp_file = tempfile::Builder::new()
            .prefix("lazypredict_chart_")
            .suffix(".png")
            .tempfile()
            .map_err(|e| PredictError::Render(format!("Failed to create temp file: {}", e)))?;

        {
            let backend = BitMapBackend::new(temp_file.path(), (self.width, self.height));
            let root = backend.into_drawing_area();
            root.fill(&WHITE)
                .map_err(|e| PredictError::Render(format!("Failed to fill canvas: {}", e)))?;

            let title = format!("{} Price Prediction", CoinEntry::display_id(&series.coin_id));
            let mut chart = ChartBuilder::on(&root)
                .caption(title, ("sans-serif", 30).into_font())
                .margin(15)
                .x_label_area_size(40)
                .y_label_area_size(70)
                .build_cartesian_2d(x_range, y_range)
                .map_err(|e| PredictError::Render(format!("Failed to build chart: {}", e)))?;

            chart
                .configure_mesh()
                .x_desc("Date")
                .y_desc("Price (USD)")
                .x_label_formatter(&|d: &DateTime<Utc>| d.format("%Y-%m-%d").to_string())
                .draw()
                .map_err(|e| PredictError::Render(format!("Failed to draw mesh: {}", e)))?;

            chart
                .draw_series(LineSeries::new(
                    series.points().iter().map(|p| (p.timestamp, p.price)),
                    &BLUE,
                ))
                .map_err(|e| PredictError::Render(format!("Failed to draw prices: {}", e)))?
                .label("Actual Price")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

            let label = format!("Predicted: ${:.2}", predicted);

            // Ligne verticale pointillée à la date cible
            chart
                .draw_series(dash_segments(y_min, y_max).map(|(from, to)| {
                    PathElement::new(vec![(target, from), (target, to)], RED.stroke_width(2))
                }))
                .map_err(|e| PredictError::Render(format!("Failed to draw target line: {}", e)))?
                .label(format!("Predicted Price: ${:.2}", predicted))
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

            // Point prédit + annotation décalée à droite
            chart
                .draw_series(std::iter::once(
                    EmptyElement::at((target, predicted))
                        + Circle::new((0, 0), 5, BLACK.filled())
                        + Text::new(label, (10, -10), ("sans-serif", 15).into_font()),
                ))
                .map_err(|e| PredictError::Render(format!("Failed to draw prediction: {}", e)))?;

            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(|e| PredictError::Render(format!("Failed to draw legend: {}", e)))?;

            root.present()
                .map_err(|e| PredictError::Render(format!("Failed to render chart: {}", e)))?;
        }

        let image = fs::read(temp_file.path())
            .map_err(|e| PredictError::Render(format!("Failed to read chart file: {}", e)))?;

        debug!(bytes = image.len(), "Rendered prediction chart");
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PricePoint;
    use chrono::TimeZone;

    fn series() -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        PriceSeries::from_points(
            "bitcoin".to_string(),
            (0..10)
                .map(|d| PricePoint::new(start + Duration::days(d), 100.0 + d as f64 * 10.0))
                .collect(),
        )
    }

    #[test]
    fn test_axis_ranges_cover_future_target() {
        let series = series();
        let target = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let (x, y) = axis_ranges(&series, target, 400.0).unwrap();
        assert_eq!(x.start, series.origin().unwrap());
        assert!(x.end > target);
        assert!(y.start < 100.0);
        assert!(y.end > 400.0);
    }

    #[test]
    fn test_axis_ranges_cover_past_target() {
        let series = series();
        let target = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();

        let (x, y) = axis_ranges(&series, target, -50.0).unwrap();
        assert_eq!(x.start, target);
        assert!(y.start < -50.0);
    }

    #[test]
    fn test_axis_ranges_flat_series_has_height() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let flat = PriceSeries::from_points(
            "tether".to_string(),
            vec![PricePoint::new(start, 1.0), PricePoint::new(start + Duration::days(1), 1.0)],
        );

        let (_, y) = axis_ranges(&flat, start, 1.0).unwrap();
        assert!(y.end > y.start);
    }

    #[test]
    fn test_dash_segments_span_axis() {
        let dashes: Vec<(f64, f64)> = dash_segments(0.0, 590.0).collect();

        assert_eq!(dashes.len(), DASH_COUNT);
        assert_eq!(dashes[0], (0.0, 10.0));
        let last = dashes[DASH_COUNT - 1];
        assert!((last.1 - 590.0).abs() < 1e-9);
    }

    #[test]
    fn test_axis_ranges_empty_series() {
        let empty = PriceSeries::new("bitcoin".to_string());
        assert!(axis_ranges(&empty, Utc::now(), 1.0).is_none());
    }

    #[test]
    fn test_axis_ranges_last_representable_date() {
        let target = target_instant(NaiveDate::MAX);
        assert!(axis_ranges(&series(), target, 1.0).is_none());
    }

    #[test]
    fn test_render_last_representable_date_is_render_error() {
        let request = ChartRequest {
            series: series(),
            target: NaiveDate::MAX,
            predicted_price: 1.0,
        };

        let err = PlottersRenderer::default().render(&request).unwrap_err();
        assert!(matches!(err, PredictError::Render(_)));
    }

    #[test]
    fn test_plotters_renderer_produces_png() {
        let renderer = PlottersRenderer::default();
        let targets = [
            NaiveDate::from_ymd_opt(2024, 5, 5).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        ];

        for target in targets {
            let request = ChartRequest {
                series: series(),
                target,
                predicted_price: 150.0,
            };

            let png = renderer.render(&request).unwrap();
            assert!(png.starts_with(&[0x89, b'P', b'N', b'G']), "target {}", target);
            assert!(png.len() > 1000, "target {}: {} bytes", target, png.len());
        }
    }
}
