// ============================================================================
// LazyPredict - Serveur de prédiction de prix crypto
// ============================================================================
// Page web : choix d'une crypto + date, prédiction par régression linéaire
// sur les 30 derniers jours de prix CoinGecko, graphique PNG.
//
// CONCEPTS RUST CLÉS :
// 1. #[tokio::main] : main asynchrone sur le runtime tokio
// 2. Logging fichier + console avec tracing
// 3. Configuration explicite (clap) passée à chaque composant
// ============================================================================

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use lazypredict::config::Config;
use lazypredict::server;

// ============================================================================
// Initialisation du logging
// ============================================================================
// - Fichier avec rotation quotidienne (tracing-appender)
// - Console (stdout) pour le développement
// ============================================================================

/// Initialise le système de logging
///
/// CONCEPT RUST : Tracing subscriber
/// - Registry : point central des logs
/// - Layer : transforme et route les logs
/// - EnvFilter : filtre par niveau (RUST_LOG env var)
/// - RollingFileAppender : rotation automatique
///
/// # Utilisation
/// ```bash
/// # Voir les logs en temps réel
/// tail -f ./logs/lazypredict.log.*
///
/// # Contrôler le niveau de log
/// RUST_LOG=debug cargo run
/// RUST_LOG=lazypredict=trace,tower_http=debug cargo run
/// ```
fn init_logging(config: &Config) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = config.log_dir.clone();

    // Crée le répertoire s'il n'existe pas
    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    // Nouveau fichier chaque jour : lazypredict.log.2024-01-15
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "lazypredict.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender) // Écrit dans le fichier
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true) // Inclut le module (ex: lazypredict::api::coingecko)
                .with_thread_ids(true) // Inclut l'ID du thread (utile pour async)
                .with_line_number(true), // Inclut le numéro de ligne
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            // Par défaut : debug pour lazypredict, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazypredict=debug,tower_http=info,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    // Initialize logging FIRST
    // - Si init échoue, on affiche l'erreur et continue quand même
    init_logging(&config).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(
        bind = %config.bind,
        api = %config.api_base,
        lookback_days = config.lookback_days,
        "LazyPredict starting up"
    );

    server::serve(&config).await
}
