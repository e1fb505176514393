//! Rendered home page cache trait (port)

use std::time::SystemTime;

use async_trait::async_trait;

use crate::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// The cached page is at least as new as every source document.
    Fresh(String),
    /// No usable cache. `sources_as_of` is the newest source modification
    /// time observed, to be handed back to [`PageCache::store`].
    Stale { sources_as_of: SystemTime },
}

#[async_trait]
pub trait PageCache: Send + Sync {
    async fn lookup(&self) -> CacheLookup;

    /// Writes a freshly rendered page that reflects the sources as of
    /// `sources_as_of`.
    async fn store(&self, html: &str, sources_as_of: SystemTime) -> Result<(), DomainError>;

    /// Deletes every cached artifact, returning how many files were removed.
    async fn clear(&self) -> Result<usize, DomainError>;
}
