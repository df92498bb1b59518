// ============================================================================
// LazyPredict - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;       // Client API CoinGecko
pub mod catalog;   // Cache du catalogue des cryptos
pub mod chart;     // Rendu du graphique PNG
pub mod config;    // Configuration (CLI + variables d'environnement)
pub mod error;     // Erreurs de prédiction
pub mod models;    // Structures de données
pub mod predictor; // Régression linéaire
pub mod server;    // Serveur HTTP

#[cfg(test)]
mod testing;       // Doublures de test

pub use config::Config;
pub use error::PredictError;
