// ============================================================================
// Stockage du catalogue
// ============================================================================
// Persistance de l'enregistrement {coins, fetched_at}
//
// - FileStore : fichier JSON, écriture atomique (fichier temporaire + rename)
// - MemoryStore : en mémoire, pour les tests ou un déploiement sans disque
// ============================================================================

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::CoinEntry;

/// Erreurs de stockage du catalogue
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    Poisoned,

    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Contenu persisté : la liste et l'instant où elle a été récupérée
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    pub coins: Vec<CoinEntry>,
    pub fetched_at: DateTime<Utc>,
}

impl CacheRecord {
    pub fn new(coins: Vec<CoinEntry>, fetched_at: DateTime<Utc>) -> Self {
        Self { coins, fetched_at }
    }

    /// Encore valide si moins de `ttl` s'est écoulé depuis la récupération
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.fetched_at < ttl
    }
}

/// Backend de stockage du catalogue
pub trait CatalogStore: Send + Sync {
    /// Charge l'enregistrement, `None` s'il n'existe pas (ou est illisible)
    fn load(&self) -> Result<Option<CacheRecord>, CatalogError>;

    /// Remplace l'enregistrement
    fn save(&self, record: &CacheRecord) -> Result<(), CatalogError>;
}

// ============================================================================
// FileStore
// ============================================================================

/// Catalogue stocké dans un fichier JSON
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Supprime un fichier cache illisible ; false si la suppression échoue
    fn remove_corrupt(&self) -> bool {
        match fs::remove_file(&self.path) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to remove corrupt catalog cache");
                false
            }
        }
    }
}

impl CatalogStore for FileStore {
    fn load(&self) -> Result<Option<CacheRecord>, CatalogError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&contents) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                // Fichier corrompu : supprimé pour forcer un nouveau téléchargement
                warn!(path = %self.path.display(), error = %e, "Corrupt catalog cache, removing");
                self.remove_corrupt();
                Ok(None)
            }
        }
    }

    /// Écrit dans un fichier temporaire du même répertoire puis le renomme :
    /// un lecteur voit soit l'ancien fichier complet, soit le nouveau.
    fn save(&self, record: &CacheRecord) -> Result<(), CatalogError> {
        let dir = self.parent_dir();
        fs::create_dir_all(&dir)?;

        let mut tmp = tempfile::Builder::new()
            .prefix(".coin_list")
            .suffix(".tmp")
            .tempfile_in(&dir)?;
        serde_json::to_writer(&mut tmp, record)?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), coins = record.coins.len(), "Catalog cache written");
        Ok(())
    }
}

// ============================================================================
// MemoryStore
// ============================================================================

/// Catalogue conservé en mémoire
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: Mutex<Option<CacheRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: CacheRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }
}

impl CatalogStore for MemoryStore {
    fn load(&self) -> Result<Option<CacheRecord>, CatalogError> {
        let guard = self.record.lock().map_err(|_| CatalogError::Poisoned)?;
        Ok(guard.clone())
    }

    fn save(&self, record: &CacheRecord) -> Result<(), CatalogError> {
        let mut guard = self.record.lock().map_err(|_| CatalogError::Poisoned)?;
        *guard = Some(record.clone());
        Ok(())
    }
}
