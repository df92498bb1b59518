// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod coin;       // Entrée du catalogue (id, nom)
pub mod prediction; // Résultat d'une prédiction
pub mod price;      // Série de prix historiques

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use lazypredict::models::price::PriceSeries;
// On peut faire : use lazypredict::models::PriceSeries;
pub use coin::CoinEntry;
pub use prediction::{Prediction, PredictionResponse};
pub use price::{PricePoint, PriceSeries};
