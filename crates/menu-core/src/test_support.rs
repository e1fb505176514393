//! In-memory adapters for service tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::SystemTime;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Category, Layout, MenuItem, SiteConfig, UploadedFile};
use crate::error::DomainError;
use crate::repositories::{CacheLookup, PageCache, SiteRepository, UploadStorage};

#[derive(Default)]
struct Documents {
    config: SiteConfig,
    categories: Vec<Category>,
    menu: Vec<MenuItem>,
}

/// Yields between every load and save so unsynchronised writers interleave.
#[derive(Default)]
pub struct MemoryRepository {
    docs: Mutex<Documents>,
}

impl MemoryRepository {
    pub fn with(categories: Vec<Category>, menu: Vec<MenuItem>) -> Self {
        Self {
            docs: Mutex::new(Documents {
                config: SiteConfig::default(),
                categories,
                menu,
            }),
        }
    }

    pub async fn config(&self) -> SiteConfig {
        self.docs.lock().await.config.clone()
    }

    pub async fn categories(&self) -> Vec<Category> {
        self.docs.lock().await.categories.clone()
    }

    pub async fn menu(&self) -> Vec<MenuItem> {
        self.docs.lock().await.menu.clone()
    }
}

#[async_trait]
impl SiteRepository for MemoryRepository {
    async fn load_config(&self) -> SiteConfig {
        let config = self.docs.lock().await.config.clone();
        tokio::task::yield_now().await;
        config
    }

    async fn save_config(&self, config: &SiteConfig) -> Result<(), DomainError> {
        tokio::task::yield_now().await;
        self.docs.lock().await.config = config.clone();
        Ok(())
    }

    async fn load_categories(&self) -> Vec<Category> {
        let categories = self.docs.lock().await.categories.clone();
        tokio::task::yield_now().await;
        categories
    }

    async fn save_categories(&self, categories: &[Category]) -> Result<(), DomainError> {
        tokio::task::yield_now().await;
        self.docs.lock().await.categories = categories.to_vec();
        Ok(())
    }

    async fn load_menu(&self) -> Vec<MenuItem> {
        let menu = self.docs.lock().await.menu.clone();
        tokio::task::yield_now().await;
        menu
    }

    async fn save_menu(&self, items: &[MenuItem]) -> Result<(), DomainError> {
        tokio::task::yield_now().await;
        self.docs.lock().await.menu = items.to_vec();
        Ok(())
    }
}

/// Hands out sequential `uploads/t_<n>.<ext>` references, or fails on demand.
#[derive(Default)]
pub struct MemoryUploads {
    pub saved: AtomicUsize,
    pub fail: bool,
}

impl MemoryUploads {
    pub fn failing() -> Self {
        Self {
            saved: AtomicUsize::new(0),
            fail: true,
        }
    }
}

#[async_trait]
impl UploadStorage for MemoryUploads {
    async fn save(&self, file: &UploadedFile) -> Result<String, DomainError> {
        if self.fail {
            return Err(DomainError::UploadError("disk full".into()));
        }
        let n = self.saved.fetch_add(1, Ordering::SeqCst);
        let ext = file.extension().map(|e| format!(".{e}")).unwrap_or_default();
        Ok(format!("uploads/t_{n}{ext}"))
    }
}

#[derive(Default)]
pub struct MemoryCache {
    pub cleared: AtomicUsize,
}

#[async_trait]
impl PageCache for MemoryCache {
    async fn lookup(&self) -> CacheLookup {
        CacheLookup::Stale {
            sources_as_of: SystemTime::UNIX_EPOCH,
        }
    }

    async fn store(&self, _html: &str, _sources_as_of: SystemTime) -> Result<(), DomainError> {
        Ok(())
    }

    async fn clear(&self) -> Result<usize, DomainError> {
        self.cleared.fetch_add(1, Ordering::SeqCst);
        Ok(1)
    }
}

pub fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        image: String::new(),
        visible: true,
        layout: Layout::Two,
    }
}

pub fn item(id: &str, name: &str, category_id: &str) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        price: "100".to_string(),
        image: String::new(),
        category_id: category_id.to_string(),
        favorite: false,
        description: String::new(),
        variants: Vec::new(),
    }
}

pub fn upload(name: &str) -> Option<UploadedFile> {
    UploadedFile::new(name.to_string(), vec![0xFF, 0xD8, 0xFF])
}
