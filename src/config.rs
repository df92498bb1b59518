// ============================================================================
// Configuration
// ============================================================================
// Tous les réglages du serveur dans une seule structure, passée
// explicitement à chaque composant (pas d'état global).
//
// CONCEPT RUST : clap derive
// - #[derive(Parser)] génère le parsing des arguments
// - #[arg(env = "...")] : chaque option peut venir d'une variable d'environnement
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_API_BASE: &str = "https://api.coingecko.com/api/v3";

/// Serveur de prédiction de prix crypto
#[derive(Debug, Clone, Parser)]
#[command(name = "lazypredict", version)]
pub struct Config {
    /// Adresse d'écoute du serveur HTTP
    #[arg(long, env = "LAZYPREDICT_BIND", default_value = "127.0.0.1:5000")]
    pub bind: String,

    /// URL de base de l'API de marché
    #[arg(long, env = "LAZYPREDICT_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Devise de cotation
    #[arg(long, env = "LAZYPREDICT_VS_CURRENCY", default_value = "usd")]
    pub vs_currency: String,

    /// Nombre de jours d'historique utilisés pour la régression
    #[arg(long, env = "LAZYPREDICT_LOOKBACK_DAYS", default_value_t = 30)]
    pub lookback_days: u32,

    /// Fichier cache du catalogue (défaut : répertoire cache de la plateforme)
    #[arg(long, env = "LAZYPREDICT_CACHE_FILE")]
    pub cache_file: Option<PathBuf>,

    /// Durée de validité du catalogue en cache
    #[arg(long, env = "LAZYPREDICT_CACHE_TTL_HOURS", default_value_t = 24)]
    pub cache_ttl_hours: u32,

    /// Timeout des requêtes vers l'API
    #[arg(long, env = "LAZYPREDICT_HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub http_timeout_secs: u64,

    /// Répertoire des fichiers de logs
    #[arg(long, env = "LAZYPREDICT_LOG_DIR", default_value = "./logs")]
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            vs_currency: "usd".to_string(),
            lookback_days: 30,
            cache_file: None,
            cache_ttl_hours: 24,
            http_timeout_secs: 30,
            log_dir: PathBuf::from("./logs"),
        }
    }
}

impl Config {
    /// Chemin effectif du fichier cache
    pub fn cache_path(&self) -> PathBuf {
        self.cache_file.clone().unwrap_or_else(default_cache_file)
    }

    pub fn cache_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.cache_ttl_hours))
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// Emplacement par défaut : ~/.cache/lazypredict/coin_list.json sur Linux
pub fn default_cache_file() -> PathBuf {
    let dir = match dirs::cache_dir() {
        Some(cache) => cache.join("lazypredict"),
        None => PathBuf::from(".lazypredict-cache"),
    };
    dir.join("coin_list.json")
}
