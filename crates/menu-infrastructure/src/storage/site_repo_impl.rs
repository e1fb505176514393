// ============================================================================
// Menu Infrastructure - JSON Site Repository
// File: crates/menu-infrastructure/src/storage/site_repo_impl.rs
// ============================================================================

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use menu_core::domain::coerce::collection_from_value;
use menu_core::domain::{Category, MenuItem, SiteConfig};
use menu_core::error::DomainError;
use menu_core::repositories::SiteRepository;
use menu_shared::constants::{CATEGORIES_FILE, CONFIG_FILE, MENU_FILE};

use super::json_store::{load_document, save_document};

/// The site documents as `config.json`, `categories.json` and `menu.json`
/// inside one data directory.
pub struct JsonSiteRepository {
    data_dir: PathBuf,
    config_path: PathBuf,
    categories_path: PathBuf,
    menu_path: PathBuf,
}

impl JsonSiteRepository {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            config_path: data_dir.join(CONFIG_FILE),
            categories_path: data_dir.join(CATEGORIES_FILE),
            menu_path: data_dir.join(MENU_FILE),
            data_dir,
        }
    }

    /// Creates the data directory if it does not exist.
    pub async fn ensure_dir(&self) -> Result<(), DomainError> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| DomainError::StorageError(format!("Failed to create {}: {e}", self.data_dir.display())))?;
        info!("Data directory ready at {}", self.data_dir.display());
        Ok(())
    }

    /// Paths whose modification times decide home page cache freshness.
    pub fn document_paths(&self) -> Vec<PathBuf> {
        vec![
            self.config_path.clone(),
            self.categories_path.clone(),
            self.menu_path.clone(),
        ]
    }

    async fn load_collection<T: DeserializeOwned>(path: &Path) -> Vec<T> {
        let Some(value) = load_document(path).await else {
            return Vec::new();
        };
        collection_from_value(value).unwrap_or_else(|| {
            warn!("{} is not a JSON array, using an empty list", path.display());
            Vec::new()
        })
    }
}

#[async_trait]
impl SiteRepository for JsonSiteRepository {
    async fn load_config(&self) -> SiteConfig {
        let Some(value) = load_document(&self.config_path).await else {
            return SiteConfig::default();
        };
        SiteConfig::from_value(value).unwrap_or_else(|| {
            warn!("{} is not a JSON object, using defaults", self.config_path.display());
            SiteConfig::default()
        })
    }

    async fn save_config(&self, config: &SiteConfig) -> Result<(), DomainError> {
        save_document(&self.config_path, config).await
    }

    async fn load_categories(&self) -> Vec<Category> {
        Self::load_collection(&self.categories_path).await
    }

    async fn save_categories(&self, categories: &[Category]) -> Result<(), DomainError> {
        save_document(&self.categories_path, categories).await
    }

    async fn load_menu(&self) -> Vec<MenuItem> {
        Self::load_collection(&self.menu_path).await
    }

    async fn save_menu(&self, items: &[MenuItem]) -> Result<(), DomainError> {
        save_document(&self.menu_path, items).await
    }
}
