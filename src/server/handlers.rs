// ============================================================================
// Handlers HTTP
// ============================================================================
// GET /          -> page HTML avec le catalogue
// POST /predict  -> {"predicted_price", "graph"} ou {"error"}
// GET /health    -> {"status": "ok"}
//
// CONCEPT : Machine à états d'une requête /predict
//   date -> fetch -> régression -> graphique -> JSON
//   Chaque étape peut échouer avec son propre type d'erreur (PredictError).
//   Toutes les réponses ont le statut 200, comme le formulaire l'attend.
// ============================================================================

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::response::{Html, IntoResponse, Json, Response};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::chart::ChartRequest;
use crate::error::{PredictError, Result};
use crate::models::{Prediction, PredictionResponse};
use crate::predictor;
use crate::server::page::render_index;
use crate::server::AppState;

/// Champs du formulaire /predict
#[derive(Debug, Deserialize)]
pub struct PredictForm {
    pub coin: String,
    pub date: String,
}

/// Réponse d'erreur : le client ne voit que le message associé au type
impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        warn!(kind = self.kind(), error = %self, "Prediction failed");
        Json(json!({ "error": self.user_message() })).into_response()
    }
}

/// Parse la date cible (format YYYY-MM-DD, année 0001 à 9999)
///
/// CONCEPT : chrono est plus permissif que le format affiché
/// - `%Y` accepte un signe et l'année 0, et les champs numériques tolèrent
///   des espaces : on valide l'année et l'absence d'espaces avant de parser
pub fn parse_target_date(input: &str) -> Result<NaiveDate> {
    let invalid = || PredictError::DateFormat {
        input: input.to_string(),
    };

    let (year, _) = input.split_once('-').ok_or_else(invalid)?;
    let year_ok = year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()) && year != "0000";
    if !year_ok || input.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| invalid())
}

/// Exécute une prédiction complète
///
/// La date est validée avant tout appel réseau.
pub async fn run_prediction(state: &AppState, coin: &str, date: &str) -> Result<Prediction> {
    let target = parse_target_date(date)?;

    // L'id est transmis tel quel ; seul l'id vide est refusé sans appel réseau
    if coin.is_empty() {
        return Err(PredictError::DataUnavailable("empty coin id".to_string()));
    }

    let series = state.market.price_history(coin).await?;
    let predicted_price = predictor::predict_price(&series, target)?;

    // plotters est synchrone et gourmand en CPU : hors du runtime async
    let renderer = Arc::clone(&state.renderer);
    let request = ChartRequest {
        series,
        target,
        predicted_price,
    };
    let chart_png = tokio::task::spawn_blocking(move || renderer.render(&request))
        .await
        .map_err(|e| PredictError::Render(format!("render task failed: {}", e)))??;

    Ok(Prediction::new(predicted_price, chart_png))
}

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let coins = state.catalog.coins().await;
    Html(render_index(&coins))
}

/// POST /predict
#[instrument(skip_all, fields(coin = %form.coin, date = %form.date))]
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PredictForm>,
) -> std::result::Result<Json<PredictionResponse>, PredictError> {
    let prediction = run_prediction(&state, &form.coin, &form.date).await?;
    info!(predicted_price = prediction.predicted_price, "Prediction served");
    Ok(Json(prediction.to_response()))
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
