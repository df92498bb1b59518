// ============================================================================
// Erreurs de prédiction
// ============================================================================
// Ensemble fermé des erreurs visibles par l'utilisateur.
//
// CONCEPT RUST : thiserror
// - #[error("...")] génère l'implémentation de Display
// - Le texte Display contient le détail technique (pour les logs)
// - user_message() renvoie un message fixe par type (pour le client)
// ============================================================================

/// Erreurs d'une requête de prédiction
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    /// Date cible illisible (format attendu : YYYY-MM-DD)
    #[error("invalid target date {input:?}")]
    DateFormat { input: String },

    /// L'API n'a pas fourni de données exploitables
    #[error("market data unavailable: {0}")]
    DataUnavailable(String),

    /// La régression n'a pas pu produire de valeur
    #[error("regression failed: {0}")]
    Fit(String),

    /// Le graphique n'a pas pu être généré
    #[error("chart rendering failed: {0}")]
    Render(String),
}

impl PredictError {
    /// Message renvoyé au client, indépendant du détail interne
    pub fn user_message(&self) -> &'static str {
        match self {
            PredictError::DateFormat { .. } => "Invalid date format. Please use YYYY-MM-DD.",
            PredictError::DataUnavailable(_) => "Failed to fetch data. Please check the coin name.",
            PredictError::Fit(_) => "Failed to compute a prediction from the price data.",
            PredictError::Render(_) => "Failed to render the prediction chart.",
        }
    }

    /// Nom court pour les logs structurés
    pub fn kind(&self) -> &'static str {
        match self {
            PredictError::DateFormat { .. } => "date_format",
            PredictError::DataUnavailable(_) => "data_unavailable",
            PredictError::Fit(_) => "fit",
            PredictError::Render(_) => "render",
        }
    }
}

impl From<reqwest::Error> for PredictError {
    fn from(e: reqwest::Error) -> Self {
        PredictError::DataUnavailable(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PredictError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_internal_detail() {
        let err = PredictError::DataUnavailable("HTTP 404 Not Found from https://x".to_string());
        assert_eq!(
            err.user_message(),
            "Failed to fetch data. Please check the coin name."
        );
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_date_format_message() {
        let err = PredictError::DateFormat {
            input: "not-a-date".to_string(),
        };
        assert_eq!(err.user_message(), "Invalid date format. Please use YYYY-MM-DD.");
        assert_eq!(err.kind(), "date_format");
    }
}
