// ============================================================================
// Structure : CoinEntry
// ============================================================================
// Une entrée du catalogue : identifiant API + nom affiché
//
// CONCEPTS RUST :
// 1. String vs &str :
//    - String : owned string (possède la mémoire, heap allocated)
//    - &str : borrowed string slice (référence, ne possède pas)
//    - On utilise String ici car l'entrée possède ses données
// ============================================================================

use serde::{Deserialize, Serialize};

/// Une crypto connue de l'API (ex: id = "bitcoin", name = "Bitcoin")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinEntry {
    /// Identifiant utilisé dans les URLs de l'API
    pub id: String,

    /// Nom complet pour l'affichage
    pub name: String,
}

impl CoinEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Nom pour le titre du graphique : "bitcoin" -> "Bitcoin"
    pub fn display_id(id: &str) -> String {
        let mut chars = id.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}
