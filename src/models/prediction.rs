// ============================================================================
// Structure : Prediction
// ============================================================================
// Résultat d'une requête /predict : prix prédit + graphique PNG
//
// CONCEPT RUST : Sérialisation personnalisée
// - Le PNG est stocké en octets bruts (Vec<u8>)
// - Il est encodé en base64 uniquement au moment de la réponse JSON
// ============================================================================

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;

/// Prix prédit et graphique associé
#[derive(Debug, Clone)]
pub struct Prediction {
    pub predicted_price: f64,
    pub chart_png: Vec<u8>,
}

impl Prediction {
    pub fn new(predicted_price: f64, chart_png: Vec<u8>) -> Self {
        Self {
            predicted_price,
            chart_png,
        }
    }

    /// Forme JSON envoyée au client
    pub fn to_response(&self) -> PredictionResponse {
        PredictionResponse {
            predicted_price: self.predicted_price,
            graph: STANDARD.encode(&self.chart_png),
        }
    }
}

/// Corps JSON : `{"predicted_price": 123.4, "graph": "iVBORw0..."}`
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub predicted_price: f64,
    pub graph: String,
}
