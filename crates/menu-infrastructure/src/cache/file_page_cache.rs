// ============================================================================
// Menu Infrastructure - Home Page File Cache
// File: crates/menu-infrastructure/src/cache/file_page_cache.rs
// ============================================================================

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use menu_core::error::DomainError;
use menu_core::repositories::{CacheLookup, PageCache};
use menu_shared::constants::HOME_CACHE_FILE;

use crate::storage::json_store::temp_path;

/// Home page cached as `<dir>/home.html`.
///
/// Freshness is purely the file's modification time: the cache is served
/// while it is at least as new as every source document. [`PageCache::store`]
/// stamps the file with the sources' time observed before rendering, so a
/// document saved during a render leaves the cache stale.
pub struct FilePageCache {
    dir: PathBuf,
    page: PathBuf,
    sources: Vec<PathBuf>,
}

impl FilePageCache {
    pub fn new(dir: impl AsRef<Path>, sources: Vec<PathBuf>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        Self {
            page: dir.join(HOME_CACHE_FILE),
            dir,
            sources,
        }
    }

    /// Newest modification time among the sources; missing files count as the epoch.
    async fn sources_as_of(&self) -> SystemTime {
        let mut newest = SystemTime::UNIX_EPOCH;
        for source in &self.sources {
            if let Ok(modified) = tokio::fs::metadata(source).await.and_then(|m| m.modified()) {
                newest = newest.max(modified);
            }
        }
        newest
    }
}

#[async_trait]
impl PageCache for FilePageCache {
    async fn lookup(&self) -> CacheLookup {
        let sources_as_of = self.sources_as_of().await;

        let cached_at = match tokio::fs::metadata(&self.page).await.and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(_) => return CacheLookup::Stale { sources_as_of },
        };
        if cached_at < sources_as_of {
            debug!("Home page cache is stale");
            return CacheLookup::Stale { sources_as_of };
        }

        match tokio::fs::read_to_string(&self.page).await {
            Ok(html) => CacheLookup::Fresh(html),
            Err(e) => {
                warn!("Failed to read cached home page: {}", e);
                CacheLookup::Stale { sources_as_of }
            }
        }
    }

    async fn store(&self, html: &str, sources_as_of: SystemTime) -> Result<(), DomainError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| DomainError::CacheError(format!("Failed to create {}: {e}", self.dir.display())))?;

        let tmp = temp_path(&self.page);
        let page = self.page.clone();
        let html = html.to_owned();

        let written = tokio::task::spawn_blocking(move || {
            let result = write_stamped(&tmp, &page, &html, sources_as_of);
            if result.is_err() {
                let _ = std::fs::remove_file(&tmp);
            }
            result
        })
        .await
        .map_err(|e| DomainError::CacheError(format!("Cache write task failed: {e}")))?;

        written.map_err(|e| DomainError::CacheError(format!("Failed to write home page cache: {e}")))?;
        debug!("Home page cache written");
        Ok(())
    }

    async fn clear(&self) -> Result<usize, DomainError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(DomainError::CacheError(format!("Failed to list {}: {e}", self.dir.display()))),
        };

        let mut removed = 0;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DomainError::CacheError(e.to_string()))?
        {
            let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }
            match tokio::fs::remove_file(entry.path()).await {
                Ok(()) => removed += 1,
                Err(e) => warn!("Failed to remove {}: {}", entry.path().display(), e),
            }
        }

        info!("Removed {} cached files from {}", removed, self.dir.display());
        Ok(removed)
    }
}

fn write_stamped(tmp: &Path, page: &Path, html: &str, modified: SystemTime) -> std::io::Result<()> {
    let mut file = std::fs::File::create(tmp)?;
    file.write_all(html.as_bytes())?;
    file.set_modified(modified)?;
    drop(file);
    std::fs::rename(tmp, page)
}
